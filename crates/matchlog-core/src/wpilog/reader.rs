//! WPILOG file reader
//!
//! Decodes a `.wpilog` file into timestamp-ordered channel samples and plays
//! them back one tick at a time. All records sharing a timestamp form one
//! tick.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use super::WpilogError;
use crate::replay::{ReplayError, TickSource};
use crate::snapshot::{LogValue, Snapshot};

const MAGIC: &[u8; 6] = b"WPILOG";
const SUPPORTED_MAJOR: u8 = 1;
const HEADER_LEN: usize = 12;

/// Entry id reserved for control records.
const CONTROL_ENTRY_ID: u64 = 0;
const CONTROL_START: u8 = 0;
const CONTROL_FINISH: u8 = 1;
const CONTROL_SET_METADATA: u8 = 2;

/// One decoded channel sample.
#[derive(Debug, Clone)]
struct Sample {
    timestamp_us: u64,
    key: String,
    value: LogValue,
}

/// An entry declared by a Start control record.
struct EntryDecl {
    name: String,
    type_str: String,
}

/// Reads a WPILOG file and replays it tick by tick.
///
/// The whole container is decoded up front and samples are stable-sorted by
/// timestamp, since the format permits minor reordering on disk. Records for
/// undeclared entries and entries with unknown type strings are skipped;
/// structural corruption is an error fatal to this file only.
pub struct WpilogReader {
    samples: Vec<Sample>,
    cursor: usize,
}

impl WpilogReader {
    /// Open and fully decode a `.wpilog` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WpilogError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a WPILOG container from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WpilogError> {
        if bytes.len() < HEADER_LEN {
            return Err(WpilogError::Truncated("header"));
        }
        if &bytes[0..6] != MAGIC {
            return Err(WpilogError::BadMagic);
        }
        // Version is stored minor byte first.
        let (minor, major) = (bytes[6], bytes[7]);
        if major != SUPPORTED_MAJOR {
            return Err(WpilogError::UnsupportedVersion { major, minor });
        }
        let extra_len = LittleEndian::read_u32(&bytes[8..12]) as usize;
        let mut offset = HEADER_LEN
            .checked_add(extra_len)
            .filter(|end| *end <= bytes.len())
            .ok_or(WpilogError::Truncated("extra header"))?;

        let mut entries: HashMap<u64, EntryDecl> = HashMap::new();
        let mut samples = Vec::new();
        while offset < bytes.len() {
            let record = RawRecord::parse(bytes, &mut offset)?;
            if record.entry_id == CONTROL_ENTRY_ID {
                apply_control(record.payload, record.start, &mut entries)?;
            } else if let Some(decl) = entries.get(&record.entry_id) {
                if let Some(value) = decode_value(&decl.type_str, record.payload) {
                    samples.push(Sample {
                        timestamp_us: record.timestamp_us,
                        key: decl.name.clone(),
                        value,
                    });
                }
            }
        }

        // sort_by_key is stable, so same-tick publish order is preserved
        samples.sort_by_key(|sample| sample.timestamp_us);

        Ok(Self {
            samples,
            cursor: 0,
        })
    }

    /// Number of decoded channel samples across the whole log.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl TickSource for WpilogReader {
    fn start(&mut self) {
        self.cursor = 0;
    }

    fn step(&mut self, snapshot: &mut Snapshot) -> Result<bool, ReplayError> {
        let Some(first) = self.samples.get(self.cursor) else {
            return Ok(false);
        };
        let tick_us = first.timestamp_us;
        snapshot.set_timestamp_us(tick_us);
        while let Some(sample) = self.samples.get(self.cursor) {
            if sample.timestamp_us != tick_us {
                break;
            }
            snapshot.insert(sample.key.clone(), sample.value.clone());
            self.cursor += 1;
        }
        Ok(true)
    }
}

/// A record split into its header fields and payload, not yet interpreted.
struct RawRecord<'a> {
    /// Byte offset of the record start, for error reporting.
    start: usize,
    entry_id: u64,
    timestamp_us: u64,
    payload: &'a [u8],
}

impl<'a> RawRecord<'a> {
    fn parse(bytes: &'a [u8], offset: &mut usize) -> Result<Self, WpilogError> {
        let start = *offset;
        let header = bytes[*offset];
        *offset += 1;

        // Bit-packed field widths: 2 bits entry id, 2 bits payload size,
        // 3 bits timestamp, each stored as length minus one.
        let id_len = (header & 0x3) as usize + 1;
        let size_len = ((header >> 2) & 0x3) as usize + 1;
        let timestamp_len = ((header >> 4) & 0x7) as usize + 1;

        let entry_id = read_varwidth_uint(bytes, offset, id_len, start)?;
        let payload_len = read_varwidth_uint(bytes, offset, size_len, start)? as usize;
        let timestamp_us = read_varwidth_uint(bytes, offset, timestamp_len, start)?;

        let payload = bytes
            .get(*offset..*offset + payload_len)
            .ok_or(WpilogError::MalformedRecord {
                offset: start,
                message: "payload runs past end of file",
            })?;
        *offset += payload_len;

        Ok(Self {
            start,
            entry_id,
            timestamp_us,
            payload,
        })
    }
}

/// Read a little-endian unsigned integer of 1 to 8 bytes.
fn read_varwidth_uint(
    bytes: &[u8],
    offset: &mut usize,
    len: usize,
    record_start: usize,
) -> Result<u64, WpilogError> {
    let field = bytes
        .get(*offset..*offset + len)
        .ok_or(WpilogError::MalformedRecord {
            offset: record_start,
            message: "record header runs past end of file",
        })?;
    *offset += len;

    let mut value = 0u64;
    for (index, byte) in field.iter().enumerate() {
        value |= u64::from(*byte) << (8 * index);
    }
    Ok(value)
}

fn apply_control(
    payload: &[u8],
    record_start: usize,
    entries: &mut HashMap<u64, EntryDecl>,
) -> Result<(), WpilogError> {
    let malformed = |message| WpilogError::MalformedRecord {
        offset: record_start,
        message,
    };

    let (&kind, body) = payload
        .split_first()
        .ok_or(malformed("empty control record"))?;
    match kind {
        CONTROL_START => {
            if body.len() < 4 {
                return Err(malformed("start record missing entry id"));
            }
            let entry_id = u64::from(LittleEndian::read_u32(&body[0..4]));
            let mut pos = 4;
            let name = read_lp_string(body, &mut pos)
                .ok_or(malformed("start record missing entry name"))?;
            let type_str = read_lp_string(body, &mut pos)
                .ok_or(malformed("start record missing entry type"))?;
            let _metadata = read_lp_string(body, &mut pos)
                .ok_or(malformed("start record missing entry metadata"))?;

            // Entry names carry a leading slash; keys in the snapshot do not.
            let name = name.trim_start_matches('/').to_string();
            entries.insert(entry_id, EntryDecl { name, type_str });
        }
        CONTROL_FINISH => {
            if body.len() < 4 {
                return Err(malformed("finish record missing entry id"));
            }
            let entry_id = u64::from(LittleEndian::read_u32(&body[0..4]));
            entries.remove(&entry_id);
        }
        CONTROL_SET_METADATA => {
            // Entry metadata is not consumed by replay.
        }
        _ => {
            // Unknown control kinds from newer writers are skipped.
        }
    }
    Ok(())
}

/// Read a u32-length-prefixed UTF-8 string.
fn read_lp_string(bytes: &[u8], pos: &mut usize) -> Option<String> {
    let len_field = bytes.get(*pos..*pos + 4)?;
    let len = LittleEndian::read_u32(len_field) as usize;
    *pos += 4;
    let data = bytes.get(*pos..*pos + len)?;
    *pos += len;
    Some(String::from_utf8_lossy(data).into_owned())
}

/// Decode a data record payload per its entry's declared type.
///
/// Returns `None` for unknown type strings and size-mismatched payloads;
/// such samples are skipped rather than failing the file.
fn decode_value(type_str: &str, payload: &[u8]) -> Option<LogValue> {
    match type_str {
        "boolean" => payload.first().map(|byte| LogValue::Boolean(*byte != 0)),
        "int64" => (payload.len() == 8).then(|| LogValue::Integer(LittleEndian::read_i64(payload))),
        "float" => (payload.len() == 4).then(|| LogValue::Float(LittleEndian::read_f32(payload))),
        "double" => (payload.len() == 8).then(|| LogValue::Double(LittleEndian::read_f64(payload))),
        "string" | "json" => Some(LogValue::String(
            String::from_utf8_lossy(payload).into_owned(),
        )),
        "boolean[]" => Some(LogValue::BooleanArray(
            payload.iter().map(|byte| *byte != 0).collect(),
        )),
        "int64[]" => (payload.len() % 8 == 0).then(|| {
            LogValue::IntegerArray(payload.chunks_exact(8).map(LittleEndian::read_i64).collect())
        }),
        "float[]" => (payload.len() % 4 == 0).then(|| {
            LogValue::FloatArray(payload.chunks_exact(4).map(LittleEndian::read_f32).collect())
        }),
        "double[]" => (payload.len() % 8 == 0).then(|| {
            LogValue::DoubleArray(payload.chunks_exact(8).map(LittleEndian::read_f64).collect())
        }),
        "string[]" => decode_string_array(payload).map(LogValue::StringArray),
        "raw" => Some(LogValue::Raw(payload.to_vec())),
        _ => None,
    }
}

fn decode_string_array(payload: &[u8]) -> Option<Vec<String>> {
    let count_field = payload.get(0..4)?;
    let count = LittleEndian::read_u32(count_field) as usize;
    let mut pos = 4;
    let mut strings = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        strings.push(read_lp_string(payload, &mut pos)?);
    }
    Some(strings)
}
