//! Serial-over-LAN Configuration Daemon - IPMI SOL parameter engine
//!
//! solcfgd implements Get/Set SOL Configuration Parameters as property
//! passthrough to the serial-over-LAN backend service, plus a console
//! baud-rate lookup for the bit rate parameters.

pub mod sol_mgr;

pub use sol_mgr::{SolMgr, SolParam, SOL_PARAM_REVISION};
