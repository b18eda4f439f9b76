//! A trait implemented by forwarding every method to `Mock::invoke`.

use decoy::{call, BoxedValue, DoubleError, Mock, ObjectRef, TestContext};
use pretty_assertions::assert_eq;

use crate::common::item;

/// Collaborator of the code under test.
trait Inventory {
    fn count(&mut self, sku: &str) -> Result<u32, DoubleError>;
    fn reserve(&mut self, sku: &str, quantity: u32) -> Result<bool, DoubleError>;
    fn owner(&mut self) -> Result<Option<ObjectRef>, DoubleError>;
}

struct InventoryShim {
    mock: Mock,
}

impl Inventory for InventoryShim {
    fn count(&mut self, sku: &str) -> Result<u32, DoubleError> {
        let value = self
            .mock
            .invoke("countForSKU:", [BoxedValue::const_c_string(Some(sku))])?;
        Ok(value.and_then(|v| v.as_u32()).unwrap_or_default())
    }

    fn reserve(&mut self, sku: &str, quantity: u32) -> Result<bool, DoubleError> {
        let value = self.mock.invoke(
            "reserveSKU:quantity:",
            [BoxedValue::const_c_string(Some(sku)), BoxedValue::u32(quantity)],
        )?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or_default())
    }

    fn owner(&mut self) -> Result<Option<ObjectRef>, DoubleError> {
        let value = self.mock.invoke("owner", [])?;
        Ok(value.and_then(|v| v.object_ref().cloned()))
    }
}

/// Code under test: reserve `wanted` units if enough are in stock.
fn restock(inventory: &mut dyn Inventory, sku: &str, wanted: u32) -> Result<bool, DoubleError> {
    if inventory.count(sku)? < wanted {
        return Ok(false);
    }
    inventory.reserve(sku, wanted)
}

fn shim() -> InventoryShim {
    InventoryShim {
        mock: Mock::for_protocol("Inventory", TestContext::silent()),
    }
}

#[test]
fn reserves_when_in_stock() {
    let mut shim = shim();
    shim.mock.expect_once(call!(shim.mock, "countForSKU:", "A-1"))
        .returning(BoxedValue::u32(10));
    shim.mock.expect_once(call!(shim.mock, "reserveSKU:quantity:", "A-1", 4u32))
        .returning(BoxedValue::bool(true));

    assert!(restock(&mut shim, "A-1", 4).unwrap());
    assert!(shim.mock.verify().is_empty());
}

#[test]
fn skips_reservation_when_short() {
    let mut shim = shim();
    shim.mock.accept(call!(shim.mock, "countForSKU:", "B-2"))
        .returning(BoxedValue::u32(1));
    shim.mock.reject(call!(shim.mock, "reserveSKU:quantity:"));

    assert!(!restock(&mut shim, "B-2", 4).unwrap());
    assert_eq!(shim.mock.received_count("reserveSKU:quantity:"), 0);
    assert!(shim.mock.verify().is_empty());
}

#[test]
fn raised_exception_reaches_caller() {
    let mut shim = shim();
    shim.mock.accept(call!(shim.mock, "countForSKU:"))
        .any_arguments()
        .raising(BoxedValue::c_string(Some("database offline")));

    let error = restock(&mut shim, "C-3", 1).unwrap_err();
    assert_eq!(error.to_string(), "countForSKU: raised \"database offline\"");
}

#[test]
fn returned_object_is_shared() {
    let mut shim = shim();
    let owner = item("warehouse");
    shim.mock.accept(call!(shim.mock, "owner"))
        .returning(BoxedValue::object(Some(owner.clone())));

    let returned = shim.owner().unwrap().unwrap();
    assert_eq!(returned.class_name(), "Item");
    assert!(std::sync::Arc::ptr_eq(&returned, &owner));
}

#[test]
fn unexpected_call_surfaces_as_error() {
    let mut shim = shim();
    let error = shim.count("D-4").unwrap_err();
    assert_eq!(
        error.to_string(),
        "mock <Inventory> received unexpected call countForSKU:(\"D-4\")"
    );
}
