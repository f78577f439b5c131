use crate::domain::order::{NewOrder, OrderId, OrderStatus, PhoneNumber};

// ============================================================================
// Seed Orders - fixed initial list for the demo desk
// ============================================================================

pub fn seed_orders() -> Vec<NewOrder> {
    let rows: [(&str, &str, &str, u64, &str, OrderStatus); 8] = [
        ("CMD-1001", "Amine Benali", "0555123456", 3500, "Alger", OrderStatus::PreOrder),
        ("CMD-1002", "Sara Khelifi", "0661987654", 12500, "Oran", OrderStatus::PreOrder),
        ("CMD-1003", "Yacine Haddad", "0770112233", 6200, "Constantine", OrderStatus::Confirmed),
        ("CMD-1004", "Meriem Saadi", "0550443322", 8900, "Sétif", OrderStatus::Packed),
        ("CMD-1005", "Walid Cherif", "0699887766", 4100, "Blida", OrderStatus::Shipped),
        ("CMD-1006", "Nour El Houda Ait", "0772334455", 2700, "Tizi Ouzou", OrderStatus::Shipped),
        ("CMD-1007", "Rachid Bouzid", "0558667788", 15400, "Annaba", OrderStatus::Delivered),
        ("CMD-1008", "Lina Mansouri", "0665221100", 5600, "Béjaïa", OrderStatus::Returned),
    ];

    rows.into_iter()
        .map(|(id, customer, phone, value, wilaya, status)| NewOrder {
            id: OrderId::new(id),
            customer: customer.to_string(),
            phone: PhoneNumber::new(phone),
            value,
            wilaya: Some(wilaya.to_string()),
            status,
        })
        .collect()
}

/// Numbers flagged after refused COD parcels
pub fn seed_blacklist() -> Vec<String> {
    vec!["0555123456".to_string(), "+213 772 33 44 55".to_string()]
}
