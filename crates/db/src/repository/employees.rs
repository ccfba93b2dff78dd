//! Employee CRUD operations.

use tracing::{debug, info};

use crate::{models::Employee, DbError, KeyValueStore};

use super::{load_collection, save_collection, EMPLOYEES_KEY};

/// Return all employees in storage order.
pub fn list_employees(kv: &dyn KeyValueStore) -> Result<Vec<Employee>, DbError> {
    load_collection(kv, EMPLOYEES_KEY)
}

/// Fetch a single employee by id.
pub fn get_employee(kv: &dyn KeyValueStore, id: &str) -> Result<Option<Employee>, DbError> {
    Ok(list_employees(kv)?.into_iter().find(|e| e.id == id))
}

/// Insert `employee`, or replace the record with the same id in place.
pub fn upsert_employee(kv: &dyn KeyValueStore, employee: Employee) -> Result<(), DbError> {
    let mut employees = list_employees(kv)?;

    match employees.iter().position(|e| e.id == employee.id) {
        Some(index) => {
            info!("updating employee '{}'", employee.id);
            employees[index] = employee;
        }
        None => {
            info!("adding employee '{}'", employee.id);
            employees.push(employee);
        }
    }

    save_collection(kv, EMPLOYEES_KEY, &employees)
}

/// Remove the employee with `id`.  Unknown ids are a no-op.
///
/// Disputes referencing the employee are kept.
pub fn delete_employee(kv: &dyn KeyValueStore, id: &str) -> Result<(), DbError> {
    let mut employees = list_employees(kv)?;
    let before = employees.len();
    employees.retain(|e| e.id != id);

    if employees.len() == before {
        debug!("delete_employee: no employee with id '{}'", id);
    } else {
        info!("deleted employee '{}'", id);
    }

    save_collection(kv, EMPLOYEES_KEY, &employees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.into(),
            name: name.into(),
            nip: format!("NIP-{id}"),
            position: "Staf".into(),
            signature_base64: None,
            is_approver: false,
        }
    }

    #[test]
    fn empty_storage_lists_nothing() {
        let kv = MemoryStorage::new();
        assert!(list_employees(&kv).unwrap().is_empty());
    }

    #[test]
    fn distinct_employees_are_both_listed() {
        let kv = MemoryStorage::new();
        upsert_employee(&kv, employee("a", "Ani")).unwrap();
        upsert_employee(&kv, employee("b", "Bayu")).unwrap();

        let ids: Vec<_> = list_employees(&kv).unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn upsert_with_existing_id_replaces_in_place() {
        let kv = MemoryStorage::new();
        upsert_employee(&kv, employee("a", "Ani")).unwrap();
        upsert_employee(&kv, employee("b", "Bayu")).unwrap();
        upsert_employee(&kv, employee("a", "Ani Lestari")).unwrap();

        let employees = list_employees(&kv).unwrap();
        assert_eq!(employees.len(), 2);
        // Position in the collection is preserved.
        assert_eq!(employees[0].id, "a");
        assert_eq!(employees[0].name, "Ani Lestari");
    }

    #[test]
    fn delete_is_idempotent() {
        let kv = MemoryStorage::new();
        upsert_employee(&kv, employee("a", "Ani")).unwrap();
        upsert_employee(&kv, employee("b", "Bayu")).unwrap();

        delete_employee(&kv, "a").unwrap();
        let after_first = list_employees(&kv).unwrap();
        delete_employee(&kv, "a").unwrap();
        let after_second = list_employees(&kv).unwrap();

        assert!(after_first.iter().all(|e| e.id != "a"));
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn get_employee_finds_by_id() {
        let kv = MemoryStorage::new();
        upsert_employee(&kv, employee("a", "Ani")).unwrap();

        assert_eq!(get_employee(&kv, "a").unwrap().map(|e| e.name), Some("Ani".into()));
        assert_eq!(get_employee(&kv, "zzz").unwrap(), None);
    }

    #[test]
    fn corrupt_collection_is_reported() {
        let kv = MemoryStorage::new();
        kv.set(EMPLOYEES_KEY, "{not json").unwrap();

        assert!(matches!(
            list_employees(&kv),
            Err(DbError::Corrupt { key, .. }) if key == EMPLOYEES_KEY
        ));
    }
}
