//! Client and team fixtures.

use chrono::{DateTime, Duration, Utc};

use brandhub_brands::seed::{EVERGREEN_ID, QUANTUMLEAP_ID};
use brandhub_core::{BrandId, Record};

use crate::client::Client;
use crate::user::{Role, User};

pub fn clients(now: DateTime<Utc>) -> Vec<Record<Client>> {
    vec![
        Record::new(
            "client-1",
            Client {
                brand_ids: vec![BrandId::new(QUANTUMLEAP_ID)],
                last_contacted: Some(now - Duration::days(5)),
                ..Client::new("Global Solutions Ltd.", "contact@globalsolutions.com")
            },
        ),
        Record::new(
            "client-2",
            Client {
                brand_ids: vec![BrandId::new(EVERGREEN_ID)],
                last_contacted: Some(now - Duration::days(2)),
                ..Client::new("The Green Collective", "hello@greencollective.com")
            },
        ),
    ]
}

pub fn users() -> Vec<Record<User>> {
    let user = |name: &str, handle: &str, role| User {
        name: name.into(),
        email: format!("{handle}@agency.com"),
        avatar_url: Some(format!("https://i.pravatar.cc/150?u={handle}")),
        role,
    };

    vec![
        Record::new("user-1", user("Alex Johnson", "alex", Role::Admin)),
        Record::new("user-2", user("Maria Garcia", "maria", Role::Member)),
        Record::new("user-3", user("Chen Wei", "chen", Role::Member)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandhub_core::BrandScoped;

    #[test]
    fn one_admin_and_one_client_per_brand() {
        let users = users();
        assert_eq!(users.iter().filter(|u| u.is_admin()).count(), 1);
        assert_eq!(users[1].email, "maria@agency.com");

        let clients = clients(Utc::now());
        for brand in [QUANTUMLEAP_ID, EVERGREEN_ID] {
            let brand = BrandId::new(brand);
            assert_eq!(clients.iter().filter(|c| c.belongs_to(&brand)).count(), 1);
        }
    }
}
