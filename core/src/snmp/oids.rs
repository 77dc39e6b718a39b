//! OID constants for the MIB objects the inventory reads.
//!
//! Scalars carry their instance suffix (`.0`, or `.1` for the first
//! ENTITY-MIB row). Table columns do not; they are walk roots.

use async_snmp::{Oid, oid};

// -- SNMPv2-MIB system group (.1.3.6.1.2.1.1.*) --

pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}
pub fn sys_contact() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 4, 0)
}
pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}
pub fn sys_location() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 6, 0)
}

// -- ENTITY-MIB first physical / logical entity (.1.3.6.1.2.1.47.1.*) --

fn ent_physical(column: u32) -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, column, 1)
}

pub fn ent_physical_software_rev() -> Oid {
    ent_physical(10)
}
pub fn ent_physical_serial_num() -> Oid {
    ent_physical(11)
}
pub fn ent_physical_mfg_name() -> Oid {
    ent_physical(12)
}
pub fn ent_physical_model_name() -> Oid {
    ent_physical(13)
}
pub fn ent_logical_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 47, 1, 2, 1, 1, 2, 1)
}

// -- IF-MIB interfaces group (.1.3.6.1.2.1.2.*) --

pub fn if_number() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 1, 0)
}

/// `ifTable` column: `.1.3.6.1.2.1.2.2.1.{column}`
fn if_entry(column: u32) -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, column)
}

pub fn if_index() -> Oid {
    if_entry(1)
}
pub fn if_descr() -> Oid {
    if_entry(2)
}
pub fn if_type() -> Oid {
    if_entry(3)
}
pub fn if_mtu() -> Oid {
    if_entry(4)
}
pub fn if_phys_address() -> Oid {
    if_entry(6)
}
pub fn if_admin_status() -> Oid {
    if_entry(7)
}
pub fn if_oper_status() -> Oid {
    if_entry(8)
}

/// `ifXTable` column: `.1.3.6.1.2.1.31.1.1.1.{column}`
fn if_x_entry(column: u32) -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 31, 1, 1, 1, column)
}

pub fn if_name() -> Oid {
    if_x_entry(1)
}
pub fn if_alias() -> Oid {
    if_x_entry(18)
}

// -- IP-MIB ipAddrTable (.1.3.6.1.2.1.4.20.1.*) --

fn ip_addr_entry(column: u32) -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 4, 20, 1, column)
}

pub fn ip_ad_ent_addr() -> Oid {
    ip_addr_entry(1)
}
pub fn ip_ad_ent_if_index() -> Oid {
    ip_addr_entry(2)
}
pub fn ip_ad_ent_net_mask() -> Oid {
    ip_addr_entry(3)
}

// -- Fortinet (.1.3.6.1.4.1.12356.*) --

/// fgSysVersion
pub const FG_SYS_VERSION: &[u32] = &[1, 3, 6, 1, 4, 1, 12356, 101, 4, 1, 1, 0];
/// fnSysSerial
pub const FN_SYS_SERIAL: &[u32] = &[1, 3, 6, 1, 4, 1, 12356, 100, 1, 1, 1, 0];

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
