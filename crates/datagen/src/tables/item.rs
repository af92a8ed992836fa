use datagen_engine::codec::section::Encoder;

use crate::error::ExtractError;
use crate::host::Host;

pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    let count = host.item_count();
    enc.rle(
        "item_max_count",
        count as usize,
        (0..count).map(|i| host.item(i).max_stack_size),
    )?;
    Ok(())
}
