//! # Address-Type Registry
//!
//! Process-wide table binding native address families to multiaddr protocol
//! keys, in both directions.
//!
//! ## Lifecycle
//! A registry starts [`RegistryState::Uninitialized`]. [`AddressRegistry::register_builtins`]
//! installs the TCP, UDP, UTP, IPv4 and IPv6 specs plus the `ip+net` parser and
//! moves it to [`RegistryState::Ready`]; it never moves back. Calling it again is
//! a no-op, so overrides registered afterwards survive.
//!
//! ## Locking
//! Both maps sit behind one `Mutex`. Converters are `Arc`s cloned out of the
//! lock and invoked after it is released, so a slow converter never blocks
//! other lookups.
//!
//! ## Usage
//! ```rust
//! use multiaddr_net::net::{AddressRegistry, NetAddr};
//! use std::net::SocketAddr;
//!
//! let registry = AddressRegistry::with_builtins().unwrap();
//! let sa: SocketAddr = "127.0.0.1:4001".parse().unwrap();
//!
//! let ma = registry.from_net_addr(&NetAddr::Tcp(sa)).unwrap();
//! assert_eq!(ma.format().unwrap(), "/ip4/127.0.0.1/tcp/4001");
//! assert_eq!(registry.to_net_addr(&ma).unwrap(), NetAddr::Tcp(sa));
//! ```

use crate::config::RegistryConfig;
use crate::core::multiaddr::Multiaddr;
use crate::core::protocol::Protocol;
use crate::error::{constants, MultiaddrError, Result};
use crate::net::addr::{NetAddr, IP_PLUS_NET};
use crate::net::convert;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::{debug, trace, warn};

/// Converts a native address into a multiaddr.
pub type AddrParser = Arc<dyn Fn(&NetAddr) -> Result<Multiaddr> + Send + Sync + 'static>;

/// Converts a multiaddr back into a native address.
pub type MaddrParser = Arc<dyn Fn(&Multiaddr) -> Result<NetAddr> + Send + Sync + 'static>;

/// Binding between a native address family and a multiaddr protocol key.
#[derive(Clone)]
pub struct AddressSpec {
    /// Family names `NetAddr::network()` may report for this type
    pub net_names: Vec<String>,
    /// Protocol name the reverse converter is registered under
    pub key: String,
    /// Protocol this type terminates in
    pub protocol: Protocol,
    pub parse_net_addr: AddrParser,
    pub convert_multiaddr: MaddrParser,
}

impl AddressSpec {
    /// Spec keyed by `protocol.name`.
    pub fn new<P, C>(protocol: Protocol, net_names: &[&str], parse: P, convert: C) -> Self
    where
        P: Fn(&NetAddr) -> Result<Multiaddr> + Send + Sync + 'static,
        C: Fn(&Multiaddr) -> Result<NetAddr> + Send + Sync + 'static,
    {
        Self {
            net_names: net_names.iter().map(|n| n.to_string()).collect(),
            key: protocol.name.to_string(),
            protocol,
            parse_net_addr: Arc::new(parse),
            convert_multiaddr: Arc::new(convert),
        }
    }
}

impl fmt::Debug for AddressSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressSpec")
            .field("net_names", &self.net_names)
            .field("key", &self.key)
            .field("protocol", &self.protocol.name)
            .finish_non_exhaustive()
    }
}

/// Initialization state of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Uninitialized,
    Ready,
}

struct Parsers {
    addr: HashMap<String, AddrParser>,
    maddr: HashMap<String, MaddrParser>,
    state: RegistryState,
}

impl Parsers {
    fn insert_spec(&mut self, spec: &AddressSpec) {
        for name in &spec.net_names {
            self.addr.insert(name.clone(), spec.parse_net_addr.clone());
        }
        self.maddr
            .insert(spec.key.clone(), spec.convert_multiaddr.clone());
        debug!(key = %spec.key, net_names = ?spec.net_names, "Address type registered");
    }
}

/// Registry of address converters.
pub struct AddressRegistry {
    inner: Mutex<Parsers>,
}

impl Default for AddressRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AddressRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.lock() {
            Ok(inner) => {
                let mut names: Vec<&String> = inner.addr.keys().collect();
                names.sort();
                let mut keys: Vec<&String> = inner.maddr.keys().collect();
                keys.sort();
                f.debug_struct("AddressRegistry")
                    .field("state", &inner.state)
                    .field("net_names", &names)
                    .field("keys", &keys)
                    .finish()
            }
            Err(_) => f.write_str("AddressRegistry { <poisoned> }"),
        }
    }
}

impl AddressRegistry {
    /// Empty, uninitialized registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Parsers {
                addr: HashMap::new(),
                maddr: HashMap::new(),
                state: RegistryState::Uninitialized,
            }),
        }
    }

    /// Registry with the built-in address types installed.
    pub fn with_builtins() -> Result<Self> {
        let registry = Self::new();
        registry.register_builtins()?;
        Ok(registry)
    }

    /// Build a registry as described by `config`.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate_strict()?;
        let registry = Self::new();

        {
            let mut inner = registry.lock()?;
            if config.register_builtins {
                for spec in convert::builtin_specs() {
                    if config.disabled_builtins.contains(&spec.key) {
                        debug!(key = %spec.key, "Built-in address type disabled");
                        continue;
                    }
                    inner.insert_spec(&spec);
                }
                if !config.disabled_builtins.iter().any(|d| d == IP_PLUS_NET) {
                    inner
                        .addr
                        .insert(IP_PLUS_NET.to_string(), Arc::new(convert::parse_ip_plus_net_addr));
                }
                inner.state = RegistryState::Ready;
            }
        }

        for (alias, target) in &config.aliases {
            registry.register_alias(alias, target)?;
        }
        Ok(registry)
    }

    /// Process-wide registry, built-ins installed on first use.
    pub fn global() -> &'static AddressRegistry {
        static GLOBAL: OnceLock<AddressRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = AddressRegistry::new();
            if let Err(e) = registry.register_builtins() {
                warn!(error = %e, "Failed to register built-in address types");
            }
            registry
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Parsers>> {
        self.inner.lock().map_err(|_| {
            warn!("{}", constants::ERR_REGISTRY_LOCK);
            MultiaddrError::LockPoisoned
        })
    }

    /// Install the built-in address types. Idempotent.
    pub fn register_builtins(&self) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.state == RegistryState::Ready {
            trace!("Built-in address types already registered");
            return Ok(());
        }

        for spec in convert::builtin_specs() {
            inner.insert_spec(&spec);
        }
        inner
            .addr
            .insert(IP_PLUS_NET.to_string(), Arc::new(convert::parse_ip_plus_net_addr));
        inner.state = RegistryState::Ready;

        debug!(
            net_names = inner.addr.len(),
            keys = inner.maddr.len(),
            "Address registry ready"
        );
        Ok(())
    }

    pub fn state(&self) -> Result<RegistryState> {
        Ok(self.lock()?.state)
    }

    /// Register an address type. A later registration for the same family
    /// name or key replaces the earlier one.
    pub fn register(&self, spec: AddressSpec) -> Result<()> {
        self.lock()?.insert_spec(&spec);
        Ok(())
    }

    /// Register a native-family parser with no reverse converter.
    pub fn register_net_parser<F>(&self, net_name: &str, parser: F) -> Result<()>
    where
        F: Fn(&NetAddr) -> Result<Multiaddr> + Send + Sync + 'static,
    {
        self.lock()?
            .addr
            .insert(net_name.to_string(), Arc::new(parser));
        debug!(net_name, "Native address parser registered");
        Ok(())
    }

    /// Resolve `alias` to whatever parser `target` currently resolves to.
    pub fn register_alias(&self, alias: &str, target: &str) -> Result<()> {
        let mut inner = self.lock()?;
        let parser = inner
            .addr
            .get(target)
            .cloned()
            .ok_or_else(|| MultiaddrError::UnknownNetwork(target.to_string()))?;
        inner.addr.insert(alias.to_string(), parser);
        debug!(alias, target, "Native network alias registered");
        Ok(())
    }

    /// Converter for a native family name.
    pub fn resolve_to_multiaddr(&self, net_name: &str) -> Result<AddrParser> {
        let inner = self.lock()?;
        inner.addr.get(net_name).cloned().ok_or_else(|| {
            trace!(net_name, "No parser for native network");
            MultiaddrError::UnknownNetwork(net_name.to_string())
        })
    }

    /// Converter for a multiaddr protocol key.
    pub fn resolve_to_native(&self, key: &str) -> Result<MaddrParser> {
        let inner = self.lock()?;
        inner.maddr.get(key).cloned().ok_or_else(|| {
            trace!(key, "No converter for protocol key");
            MultiaddrError::UnsupportedNetwork(key.to_string())
        })
    }

    /// Convert a native address into a multiaddr.
    pub fn from_net_addr(&self, addr: &NetAddr) -> Result<Multiaddr> {
        let parser = self.resolve_to_multiaddr(&addr.network())?;
        parser(addr)
    }

    /// Convert a multiaddr into a native address, dispatching on its last
    /// protocol.
    pub fn to_net_addr(&self, maddr: &Multiaddr) -> Result<NetAddr> {
        let protocols = maddr.segments()?;
        let last = protocols.last().ok_or_else(|| {
            MultiaddrError::invalid_format(String::new(), constants::ERR_EMPTY_MULTIADDR)
        })?;
        let converter = self.resolve_to_native(last.name)?;
        converter(maddr)
    }
}
