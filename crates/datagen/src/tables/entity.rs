use datagen_engine::codec::section::Encoder;

use crate::error::ExtractError;
use crate::host::Host;

/// Entity dimensions: f32 bit patterns for height and width, then the fixed flag.
pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    let count = host.entity_type_count();
    let size = count as usize;
    let dims = |e| host.entity_dimensions(e);

    enc.rle("entity_type_height", size, (0..count).map(|e| dims(e).height.to_bits()))?;
    enc.rle("entity_type_width", size, (0..count).map(|e| dims(e).width.to_bits()))?;
    enc.rle("entity_type_fixed", size, (0..count).map(|e| u32::from(dims(e).fixed)))?;
    Ok(())
}
