//! Fixed port-risk taxonomy.
//!
//! The risky-port sets are static lookup tables rather than conditional
//! chains so the decision procedure in `risk` stays declarative and can be
//! tested exhaustively.

/// Ports that must never be reachable from the public internet. Opening one
/// of these to the world is a Critical finding.
pub const CRITICAL_PORTS: &[(u16, &str)] = &[
    (23, "Telnet"),
    (1433, "SQL Server"),
    (3306, "MySQL"),
    (5432, "PostgreSQL"),
    (6379, "Redis"),
    (9200, "Elasticsearch"),
    (27017, "MongoDB"),
];

/// Management and admin-plane ports. Public exposure is a High finding.
pub const MANAGEMENT_PORTS: &[(u16, &str)] = &[
    (20, "FTP Data"),
    (21, "FTP Control"),
    (22, "SSH"),
    (25, "SMTP"),
    (445, "SMB"),
    (3389, "RDP"),
    (5900, "VNC"),
    (5985, "WinRM"),
    (5986, "WinRM HTTPS"),
];

/// Web-service ports. Public exposure without a detectable edge layer is a
/// Medium finding.
pub const WEB_PORTS: &[(u16, &str)] = &[(80, "HTTP"), (443, "HTTPS")];

/// Well-known service name for a port, if any table lists it.
pub fn service_name(port: u16) -> Option<&'static str> {
    lookup(CRITICAL_PORTS, port)
        .or_else(|| lookup(MANAGEMENT_PORTS, port))
        .or_else(|| lookup(WEB_PORTS, port))
}

fn lookup(table: &[(u16, &'static str)], port: u16) -> Option<&'static str> {
    table.iter().find(|(p, _)| *p == port).map(|(_, name)| *name)
}

/// True when `[from, to]` contains at least one port from `table`.
pub fn intersects(table: &[(u16, &str)], from: u16, to: u16) -> bool {
    table.iter().any(|(p, _)| from <= *p && *p <= to)
}

/// Service names from `table` covered by `[from, to]`, in table order.
pub fn matched_services(table: &'static [(u16, &str)], from: u16, to: u16) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(p, _)| from <= *p && *p <= to)
        .map(|(_, name)| *name)
        .collect()
}

/// True when the range is anchored on a listed port: `from` or `to` itself
/// appears in `table`. A rule deliberately opening a critical service starts
/// or ends on that service's port; a broad sweep (1-65535) that merely
/// crosses one does not qualify.
pub fn anchored_on(table: &[(u16, &str)], from: u16, to: u16) -> bool {
    let listed = |port: u16| table.iter().any(|(p, _)| *p == port);
    listed(from) || listed(to)
}
