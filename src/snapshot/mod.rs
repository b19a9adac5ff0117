//! Snapshot ingestion: typed model and loader.

mod loader;
mod types;

pub use types::{
    GroupRef, Instance, IpPermission, IpRange, Ipv6Range, NetworkInterface, Region, Reservation,
    SecurityGroup, Snapshot, Vpc,
};
