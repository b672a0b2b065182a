//! Test Helpers

use zeroize::Zeroizing;

use crate::{
    auth::Role,
    domain::{
        accounts::{
            data::{AccountUpdate, NewAccount},
            records::{AccountRecord, AccountUuid},
        },
        devices::{data::NewDevice, records::DeviceUuid},
        employees::{data::NewEmployee, records::EmployeeUuid},
        entities::{data::NewEntity, records::EntityUuid, settings::EntitySettings},
        sessions::data::CheckIn,
        users::{data::NewAccountUser, records::AccountUserUuid},
    },
};

pub(crate) fn new_account(billing_name: &str) -> NewAccount {
    NewAccount {
        uuid: AccountUuid::new(),
        billing_name: billing_name.to_string(),
        billing_email: Some("billing@example.com".to_string()),
        billing_phone: None,
        billing_address: None,
        billing_country: Some("MX".to_string()),
        billing_tax_id: None,
        billing_notes: None,
        contact_email: None,
        contact_phone: None,
        max_entities: 2,
    }
}

pub(crate) fn account_update(account: &AccountRecord) -> AccountUpdate {
    AccountUpdate {
        billing_name: account.billing_name.clone(),
        billing_email: account.billing_email.clone(),
        billing_phone: account.billing_phone.clone(),
        billing_address: account.billing_address.clone(),
        billing_country: account.billing_country.clone(),
        billing_tax_id: account.billing_tax_id.clone(),
        billing_notes: account.billing_notes.clone(),
        contact_email: account.contact_email.clone(),
        contact_phone: account.contact_phone.clone(),
        max_entities: account.max_entities,
        is_active: account.is_active,
    }
}

pub(crate) fn new_entity(name: &str) -> NewEntity {
    NewEntity {
        uuid: EntityUuid::new(),
        entity_name: name.to_string(),
        entity_full_name: format!("{name} Security Services"),
        settings: EntitySettings::default(),
    }
}

pub(crate) fn new_account_user(
    account: AccountUuid,
    role: Role,
    subject: &str,
) -> NewAccountUser {
    NewAccountUser {
        uuid: AccountUserUuid::new(),
        account_uuid: Some(account),
        subject_id: subject.to_string(),
        email: format!("{subject}@example.com"),
        display_name: subject.to_string(),
        role,
        entity_uuids: Vec::new(),
    }
}

pub(crate) fn new_device(hardware_id: &str) -> NewDevice {
    NewDevice {
        uuid: DeviceUuid::new(),
        hardware_id: hardware_id.to_string(),
        brand: Some("TestBrand".to_string()),
        model: Some("T-1000".to_string()),
        line_number: None,
        location: None,
        coordinates: Some("19.4326,-99.1332".to_string()),
        radius_m: Some(100),
        app_version: Some("1.0.0".to_string()),
    }
}

pub(crate) fn new_employee(code: &str, badge: &str, access_key: &str) -> NewEmployee {
    NewEmployee {
        uuid: EmployeeUuid::new(),
        employee_code: code.to_string(),
        badge_number: badge.to_string(),
        profile: "guard".to_string(),
        access_key: Zeroizing::new(access_key.to_string()),
    }
}

pub(crate) fn check_in_for(employee_code: &str) -> CheckIn {
    CheckIn {
        employee_code: employee_code.to_string(),
        client_code: "CLIENT-1".to_string(),
        client_name: "Client One".to_string(),
        site_code: "SITE-A".to_string(),
        site_name: "Site Alpha".to_string(),
        post_code: "POST-1".to_string(),
        post_name: "Main Gate".to_string(),
        shift_date: "2026-08-30".to_string(),
        ingress_time: "06:00".to_string(),
        recorded_by: "device".to_string(),
        device_time: "2026-08-30T05:58:12".to_string(),
    }
}
