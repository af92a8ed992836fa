use datagen_engine::codec::section::Encoder;

use crate::error::ExtractError;
use crate::host::{Host, HostError};

/// One `str` section per built-in registry, naming its entries in id order.
pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    for registry in host.registries() {
        let paths = registry
            .entries
            .iter()
            .enumerate()
            .map(|(id, path)| {
                path.ok_or_else(|| HostError::MissingKey {
                    registry: registry.name.to_owned(),
                    id: id as u32,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        enc.strings(registry.name, paths.len(), paths)?;
    }
    Ok(())
}
