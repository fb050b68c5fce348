//! USB and GIP identifiers for Microsoft wireless controllers.
//!
//! The vendor/product pair reported by a controller's announce packet is
//! forwarded unchanged to the virtual input device, so user space sees the
//! same identity as with a wired connection.

/// Microsoft USB vendor ID.
pub const VENDOR_ID: u16 = 0x045E;

/// Wireless adapter, first revision.
pub const PRODUCT_DONGLE: u16 = 0x02E6;
/// Wireless adapter, slim revision.
pub const PRODUCT_DONGLE_SLIM: u16 = 0x02FE;
/// Wireless adapter built into some laptops.
pub const PRODUCT_DONGLE_INTEGRATED: u16 = 0x02F9;

/// Xbox One controller (launch model).
pub const PRODUCT_XBOX_ONE: u16 = 0x02D1;
/// Xbox One controller (2015 firmware).
pub const PRODUCT_XBOX_ONE_2015: u16 = 0x02DD;
/// Xbox One Elite controller.
pub const PRODUCT_XBOX_ONE_ELITE: u16 = 0x02E3;
/// Xbox One S controller.
pub const PRODUCT_XBOX_ONE_S: u16 = 0x02EA;
/// Xbox One S controller, wireless firmware variant.
pub const PRODUCT_XBOX_ONE_S_WIRELESS: u16 = 0x02FD;
/// Xbox Elite Series 2 controller.
pub const PRODUCT_XBOX_ELITE_2: u16 = 0x0B00;
/// Xbox Series X|S controller.
pub const PRODUCT_XBOX_SERIES: u16 = 0x0B12;

/// Returns `true` for the Microsoft vendor ID.
pub fn is_microsoft(vendor_id: u16) -> bool {
    vendor_id == VENDOR_ID
}

/// Human-readable name for a known product ID.
pub fn product_name(product_id: u16) -> Option<&'static str> {
    match product_id {
        PRODUCT_DONGLE => Some("Xbox Wireless Adapter"),
        PRODUCT_DONGLE_SLIM => Some("Xbox Wireless Adapter (slim)"),
        PRODUCT_DONGLE_INTEGRATED => Some("Xbox Wireless Adapter (integrated)"),
        PRODUCT_XBOX_ONE | PRODUCT_XBOX_ONE_2015 => Some("Xbox One Controller"),
        PRODUCT_XBOX_ONE_ELITE => Some("Xbox One Elite Controller"),
        PRODUCT_XBOX_ONE_S | PRODUCT_XBOX_ONE_S_WIRELESS => Some("Xbox One S Controller"),
        PRODUCT_XBOX_ELITE_2 => Some("Xbox Elite Series 2 Controller"),
        PRODUCT_XBOX_SERIES => Some("Xbox Series X|S Controller"),
        _ => None,
    }
}
