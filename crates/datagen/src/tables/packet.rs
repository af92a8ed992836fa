use datagen_engine::codec::section::Encoder;

use crate::error::ExtractError;
use crate::host::{Host, HostError};

/// One `str` section per protocol template, named `<flow>/<phase>`, listing
/// packet paths by template index. Every index below the packet count must be
/// filled exactly once.
pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    for template in host.protocol_templates() {
        let name = format!("{}/{}", template.flow, template.phase);
        let len = template.packets.len();

        let mut slots: Vec<Option<&str>> = vec![None; len];
        for &(index, path) in &template.packets {
            let slot = slots
                .get_mut(index as usize)
                .ok_or_else(|| HostError::PacketIndexOutOfRange {
                    template: name.clone(),
                    index,
                    len,
                })?;
            *slot = Some(path);
        }

        let paths = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| HostError::MissingPacket {
                    template: name.clone(),
                    index: index as u32,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        enc.strings(&name, len, paths)?;
    }
    Ok(())
}
