//! Demo data written on first start.

use tracing::info;

use crate::{models::Employee, DbError, KeyValueStore};

use super::{save_collection, EMPLOYEES_KEY};

/// The two demo employees: one approver, one staff member.
pub fn default_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: "1".into(),
            name: "Budi Santoso".into(),
            nip: "198501012010011001".into(),
            position: "Kepala Bagian Umum".into(),
            signature_base64: None,
            is_approver: true,
        },
        Employee {
            id: "2".into(),
            name: "Siti Aminah".into(),
            nip: "199005152015032005".into(),
            position: "Staf Administrasi".into(),
            signature_base64: None,
            is_approver: false,
        },
    ]
}

/// Store [`default_employees`] if the employee collection was never written.
///
/// An explicitly emptied collection is left empty.  Returns whether seeding
/// happened.
pub fn seed_defaults(kv: &dyn KeyValueStore) -> Result<bool, DbError> {
    if kv.get(EMPLOYEES_KEY)?.is_some() {
        return Ok(false);
    }

    info!("seeding demo employees");
    save_collection(kv, EMPLOYEES_KEY, &default_employees())?;
    Ok(true)
}
