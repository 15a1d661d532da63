use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use trust_dns_resolver::TokioAsyncResolver;

const ROUTE_TABLE: &str = "/proc/net/route";
const RTF_UP: u32 = 0x0001;
const RTF_GATEWAY: u32 = 0x0002;

/// Discover a hostname for the default gateway, verified by a forward lookup.
///
/// Every failure along the way is logged and treated as "no default".
pub async fn default_gateway_name() -> Option<String> {
    let gateway = default_gateway_address()?;
    tracing::debug!("Default gateway: {gateway}");

    let resolver = match TokioAsyncResolver::tokio_from_system_conf() {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::debug!("Failed to create DNS resolver: {e}");
            return None;
        }
    };

    let name = reverse_name(&resolver, IpAddr::V4(gateway)).await?;

    match resolver.lookup_ip(format!("{name}.")).await {
        Ok(addrs) => {
            if addrs.iter().any(|addr| addr == IpAddr::V4(gateway)) {
                tracing::info!("Using discovered router hostname: {name}");
                Some(name)
            } else {
                tracing::debug!("{name} does not resolve back to {gateway}, ignoring it");
                None
            }
        }
        Err(e) => {
            tracing::debug!("Forward lookup of {name} failed: {e}");
            None
        }
    }
}

/// Query the routing table for the default IPv4 gateway
pub fn default_gateway_address() -> Option<Ipv4Addr> {
    if !cfg!(target_os = "linux") {
        tracing::debug!("Default gateway discovery is only supported on Linux");
        return None;
    }

    match fs::read_to_string(ROUTE_TABLE) {
        Ok(table) => parse_default_gateway(&table),
        Err(e) => {
            tracing::debug!("Failed to read {ROUTE_TABLE}: {e}");
            None
        }
    }
}

/// PTR lookup for `ip`, without the trailing root dot
pub async fn reverse_name(resolver: &TokioAsyncResolver, ip: IpAddr) -> Option<String> {
    match resolver.reverse_lookup(ip).await {
        Ok(lookup) => lookup
            .iter()
            .next()
            .map(|ptr| ptr.to_string().trim_end_matches('.').to_string())
            .filter(|name| !name.is_empty()),
        Err(e) => {
            tracing::debug!("No PTR record for {ip}: {e}");
            None
        }
    }
}

/// Parse the Linux `/proc/net/route` format.
///
/// Columns are whitespace-separated; destination, gateway and mask are
/// little-endian hex, flags are hex.
fn parse_default_gateway(table: &str) -> Option<Ipv4Addr> {
    table.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 {
            return None;
        }

        let destination = u32::from_str_radix(fields[1], 16).ok()?;
        let gateway = u32::from_str_radix(fields[2], 16).ok()?;
        let flags = u32::from_str_radix(fields[3], 16).ok()?;
        let mask = u32::from_str_radix(fields[7], 16).ok()?;

        let is_default = destination == 0 && mask == 0;
        let is_usable = flags & RTF_UP != 0 && flags & RTF_GATEWAY != 0;

        (is_default && is_usable && gateway != 0).then(|| Ipv4Addr::from(gateway.swap_bytes()))
    })
}
