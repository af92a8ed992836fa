use datagen_engine::codec::section::Encoder;

use crate::error::ExtractError;
use crate::host::Host;

/// Two lines: the version name, then the protocol version in hex.
pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    let version = host.version();
    enc.line(version.name);
    enc.hex_line(version.protocol);
    Ok(())
}
