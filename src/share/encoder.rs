use crate::core::snapshot::SystemSnapshot;
use crate::core::types::ResourceVector;
use anyhow::{Context, Result};
use base64::alphabet::URL_SAFE;
use base64::engine::{Engine as _, general_purpose};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};

// Scenario format: (allocated, requested, available)
type CompactScenario = (Vec<ResourceVector>, Vec<ResourceVector>, ResourceVector);

fn engine() -> general_purpose::GeneralPurpose {
    general_purpose::GeneralPurpose::new(&URL_SAFE, general_purpose::PAD)
}

/// Converts a snapshot to a compact, compressed, URL-safe share code
///
/// # Arguments
/// * `snapshot` - The scenario to encode
///
/// # Returns
/// A Result that contains the encoded string or an error
pub fn encode_share_code(snapshot: &SystemSnapshot) -> Result<String> {
    let compact: CompactScenario = (
        snapshot.allocated().to_vec(),
        snapshot.requested().to_vec(),
        snapshot.available().to_vec(),
    );

    // 1. Convert to MessagePack
    let msgpack = rmp_serde::to_vec(&compact).context("Failed to convert data to MessagePack")?;

    // 2. Apply Gzip compression
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(&msgpack)
        .context("Failed to compress data")?;
    let compressed = encoder.finish().context("Failed to finish compression")?;

    // 3. Apply Base64URL encoding
    Ok(engine().encode(compressed))
}

/// Turns a share code back into a snapshot
///
/// Unlike the JSON importer this is strict: a share code is machine-written,
/// so a ragged scenario inside one means it was tampered with or truncated.
///
/// # Errors
/// Returns an error if any decoding stage fails or the decoded matrices do
/// not agree on their dimensions.
pub fn decode_share_code(code: &str) -> Result<SystemSnapshot> {
    // 1. Base64URL decode
    let compressed = engine()
        .decode(code.trim())
        .context("Share code is not valid Base64URL")?;

    // 2. Gunzip decompress
    let mut decoder = GzDecoder::new(&compressed[..]);
    let mut msgpack = Vec::new();
    decoder
        .read_to_end(&mut msgpack)
        .context("Failed to decompress share code")?;

    // 3. MessagePack deserialize
    let (allocated, requested, available): CompactScenario =
        rmp_serde::from_slice(&msgpack).context("Share code does not contain a scenario")?;

    let snapshot = SystemSnapshot::new(allocated, requested, available)
        .context("Share code contains a malformed scenario")?;
    Ok(snapshot)
}
