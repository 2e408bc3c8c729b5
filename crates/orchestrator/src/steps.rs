//! Step names used in logs and metric labels.

/// Step name: ask the inventory service whether the quantity is available.
pub const STEP_CHECK_INVENTORY: &str = "check_inventory";

/// Step name: charge the customer through the payment service.
pub const STEP_PROCESS_PAYMENT: &str = "process_payment";
