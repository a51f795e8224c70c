use std::sync::Arc;

use alloy::primitives::Address;
use etheroll_cache::ScopedCache;
use etheroll_common::ether::chain::Chain;
use tracing::debug;

use crate::{
    catalog::{Catalog, InterfaceDescription},
    error::Error,
    interfaces::read_description,
};

/// Builds and memoizes one [`Catalog`] per contract for the chain it is pointed at.
///
/// Catalogs are cached by `(chain, contract address)`. Pointing the service at another chain
/// drops every cached catalog. The service is `Send + Sync`; lookups take `&self` and can be
/// shared across threads, while [`DecodeService::set_chain`] needs exclusive access.
#[derive(Debug)]
pub struct DecodeService {
    chain: Chain,
    catalogs: ScopedCache<Chain, Address, Catalog>,
}

impl Default for DecodeService {
    fn default() -> Self {
        Self::new(Chain::default())
    }
}

impl DecodeService {
    /// Creates a service for `chain` with an empty catalog cache.
    pub fn new(chain: Chain) -> Self {
        Self { chain, catalogs: ScopedCache::new() }
    }

    /// The chain catalogs are currently cached for.
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Points the service at `chain`. Returns whether cached catalogs were dropped.
    pub fn set_chain(&mut self, chain: Chain) -> Result<bool, Error> {
        if chain == self.chain {
            return Ok(false);
        }

        debug!("switching decode service from {} to {}", self.chain, chain);
        self.chain = chain;
        let invalidated = !self.catalogs.is_empty()?;
        self.catalogs.invalidate()?;
        Ok(invalidated)
    }

    /// Returns the catalog of `address`, building it from `description` on first use.
    pub fn catalog(
        &self,
        address: Address,
        description: &InterfaceDescription,
    ) -> Result<Arc<Catalog>, Error> {
        self.catalog_with(address, || Ok(description.clone()))
    }

    /// Returns the catalog of `address`. `load` is only called when the catalog is not cached
    /// yet, so it may fetch the description from a remote source. Failures are not cached.
    pub fn catalog_with<F>(&self, address: Address, load: F) -> Result<Arc<Catalog>, Error>
    where
        F: FnOnce() -> Result<InterfaceDescription, Error>,
    {
        self.catalogs.get_or_try_insert_with(&self.chain, &address, || {
            debug!("building catalog of {} on {}", address, self.chain);
            Catalog::build(&load()?)
        })
    }

    /// Returns the catalog of `contract`, or of the chain's default deployment when no
    /// contract is given, building it from the ABI file at `abi` on first use.
    ///
    /// The ABI is only read when the catalog is not cached yet. Without a contract on a chain
    /// with no default deployment, the catalog is built every time.
    pub fn catalog_from_file(
        &self,
        contract: Option<Address>,
        abi: Option<&str>,
    ) -> Result<Arc<Catalog>, Error> {
        let load = || -> Result<InterfaceDescription, Error> { Ok(read_description(abi)?) };

        match contract.or_else(|| self.chain.default_contract_address()) {
            Some(address) => self.catalog_with(address, load),
            None => {
                debug!("no contract to cache the catalog for on {}", self.chain);
                Ok(Arc::new(Catalog::build(&load()?)?))
            }
        }
    }

    /// Returns the catalog of `address` if it is cached.
    pub fn cached_catalog(&self, address: &Address) -> Result<Option<Arc<Catalog>>, Error> {
        Ok(self.catalogs.get(&self.chain, address)?)
    }

    /// Drops every cached catalog.
    pub fn invalidate(&self) -> Result<(), Error> {
        Ok(self.catalogs.invalidate()?)
    }
}
