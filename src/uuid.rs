use crate::error::{Error, ErrorType};
use uuid::Uuid;

/// Expands HAP short ids against the Apple base UUID
/// `0000XXXX-0000-1000-8000-0026BB765291`.
pub trait ShortUuid {
    fn from_short(uuid: u32) -> Uuid;

    fn from_string(uuid_str: &str) -> Result<Uuid, Error>;

    /// Short form as HAP puts it on the wire, e.g. `25` for `On`.
    fn to_short(&self) -> Option<String>;
}

const HAP_BASE_TAIL: &[u8; 8] = b"\x80\x00\x00\x26\xBB\x76\x52\x91";

impl ShortUuid for Uuid {
    fn from_short(uuid: u32) -> Uuid {
        Uuid::from_fields(uuid, 0, 0x1000, HAP_BASE_TAIL)
    }

    fn from_string(uuid_str: &str) -> Result<Uuid, Error> {
        if let Ok(uuid) = Uuid::parse_str(uuid_str) {
            return Ok(uuid);
        }
        let long_uuid_str = match uuid_str.len() {
            1..=8 if uuid_str.chars().all(|c| c.is_ascii_hexdigit()) => {
                format!("{:0>8}-0000-1000-8000-0026bb765291", uuid_str)
            }
            _ => uuid_str.to_string(),
        };
        Uuid::parse_str(&long_uuid_str).map_err(|err| {
            Error::from_string(format!("{uuid_str}: {err}"), ErrorType::InvalidUuid)
        })
    }

    fn to_short(&self) -> Option<String> {
        let (short, d2, d3, tail) = self.as_fields();
        if d2 != 0 || d3 != 0x1000 || tail != HAP_BASE_TAIL {
            return None;
        }
        Some(format!("{short:X}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_short_uses_hap_base() {
        let on = Uuid::from_short(0x25);
        assert_eq!(
            on.to_string(),
            "00000025-0000-1000-8000-0026bb765291"
        );
        assert_eq!(on.to_short().as_deref(), Some("25"));
    }

    #[test]
    fn test_from_string_short_and_long() {
        assert_eq!(Uuid::from_string("73").unwrap(), Uuid::from_short(0x73));
        assert_eq!(
            Uuid::from_string("00000073-0000-1000-8000-0026BB765291").unwrap(),
            Uuid::from_short(0x73)
        );
        let err = Uuid::from_string("not-a-uuid").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidUuid);
    }

    #[test]
    fn test_to_short_rejects_foreign_uuid() {
        let uuid = Uuid::from_string("0000180f-0000-1000-8000-00805f9b34fb").unwrap();
        assert_eq!(uuid.to_short(), None);
    }
}
