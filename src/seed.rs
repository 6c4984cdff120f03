//! Demo data
//!
//! The portal ships with a seeded catalog, a demo account and a few
//! historical orders so the dashboard has content on first run. Prices are
//! in BRL, the portal billing currency.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::aggregates::{CartItem, CreditAccount, Order, OrderLedger, OrderStatus};
use crate::domain::catalog::{Catalog, Product};
use crate::domain::value_objects::Money;

fn brl(units: i64, cents: i64) -> Money {
    Money::brl(Decimal::new(units * 100 + cents, 2))
}

pub fn demo_account() -> CreditAccount {
    CreditAccount::new(
        "u1",
        "Roberto Silva",
        "Mercado Tech & Soluções",
        brl(15_000, 0),
        brl(3_450, 0),
    )
}

pub fn demo_catalog() -> Catalog {
    Catalog::new(vec![
        Product::new(
            "p1",
            "Notebook Pro X1",
            "Computers",
            brl(4_500, 0),
            "https://picsum.photos/400/300?random=1",
            "i7 processor, 16GB RAM, 512GB SSD, 14\" display",
            25,
        ),
        Product::new(
            "p2",
            "UltraWide Monitor 29\"",
            "Peripherals",
            brl(1_200, 0),
            "https://picsum.photos/400/300?random=2",
            "IPS, HDR10, HDMI, DisplayPort",
            50,
        ),
        Product::new(
            "p3",
            "RGB Mechanical Keyboard",
            "Peripherals",
            brl(350, 0),
            "https://picsum.photos/400/300?random=3",
            "Blue switches, ABNT2 layout, detachable cable",
            100,
        ),
        Product::new(
            "p4",
            "Ergonomic Office Chair",
            "Furniture",
            brl(850, 0),
            "https://picsum.photos/400/300?random=4",
            "Lumbar adjustment, 3D armrests, class 4 gas lift",
            15,
        ),
        Product::new(
            "p5",
            "Laser Multifunction Printer",
            "Office",
            brl(1_800, 0),
            "https://picsum.photos/400/300?random=5",
            "Wi-Fi, automatic duplex, toner included",
            8,
        ),
        Product::new(
            "p6",
            "Precision Wireless Mouse",
            "Peripherals",
            brl(120, 0),
            "https://picsum.photos/400/300?random=6",
            "Adjustable DPI, rechargeable battery",
            200,
        ),
        Product::new(
            "p7",
            "USB-C Docking Station",
            "Accessories",
            brl(450, 0),
            "https://picsum.photos/400/300?random=7",
            "10-in-1, HDMI 4K, 100W PD",
            40,
        ),
        Product::new(
            "p8",
            "Noise Cancelling Headset",
            "Audio",
            brl(600, 0),
            "https://picsum.photos/400/300?random=8",
            "Bluetooth 5.0, 30h battery",
            30,
        ),
    ])
}

fn line(catalog: &Catalog, product_id: &str, quantity: u32) -> CartItem {
    // Seed data only references seeded product ids.
    let p = catalog.get(product_id).expect("seed product exists");
    CartItem {
        product_id: p.id().to_string(),
        name: p.name().to_string(),
        category: p.category().to_string(),
        unit_price: p.price().clone(),
        quantity,
    }
}

pub fn demo_orders(catalog: &Catalog) -> OrderLedger {
    OrderLedger::with_history(vec![
        Order::historical(
            "ORD-2024-012",
            Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap(),
            OrderStatus::Pending,
            vec![line(catalog, "p5", 1)],
            brl(1_800, 0),
        ),
        Order::historical(
            "ORD-2023-054",
            Utc.with_ymd_and_hms(2023, 11, 20, 14, 0, 0).unwrap(),
            OrderStatus::Shipped,
            vec![line(catalog, "p3", 1)],
            brl(350, 0),
        ),
        Order::historical(
            "ORD-2023-001",
            Utc.with_ymd_and_hms(2023, 10, 15, 11, 15, 0).unwrap(),
            OrderStatus::Delivered,
            vec![line(catalog, "p1", 1), line(catalog, "p2", 1)],
            brl(5_700, 0),
        ),
    ])
}
