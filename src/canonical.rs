//! The canonical test-vector record layout.
//!
//! One record line carries the bunch crossing number followed by the trigger
//! objects of that crossing: 8 muons, 12 e/gamma, 12 tau, 12 jet candidates,
//! the four energy sums, 8 empty words, then the external conditions,
//! algorithm bits and the final OR.

use std::sync::LazyLock;

use crate::{
    schema::FormatSchema,
    slice::Slice,
    value::Radix,
    word::WordSpec,
};

static CANONICAL: LazyLock<FormatSchema> = LazyLock::new(|| FormatSchema::assemble(words()));

/// The canonical schema, built on first use and shared for the process lifetime.
pub fn canonical() -> &'static FormatSchema {
    &CANONICAL
}

fn calo(name: &str) -> WordSpec {
    WordSpec::new(name, Radix::HEX)
        .repeated(12)
        .width(32)
        .field("et", Slice::range(8, 0))
        .field("eta", Slice::range(16, 9))
        .field("phi", Slice::range(24, 17))
        .field("iso", Slice::range(26, 25))
        .field("reserved", Slice::range(31, 27))
}

fn scalar_sum(name: &str, status: &str) -> WordSpec {
    WordSpec::new(name, Radix::HEX)
        .width(32)
        .field("et", Slice::range(11, 0))
        .field("reserved", Slice::range(27, 12))
        .field(status, Slice::range(31, 28))
}

fn missing_sum(name: &str, status: &str) -> WordSpec {
    WordSpec::new(name, Radix::HEX)
        .width(32)
        .field("et", Slice::range(11, 0))
        .field("phi", Slice::range(19, 12))
        .field("reserved", Slice::range(27, 18))
        .field(status, Slice::range(31, 28))
}

fn words() -> Vec<WordSpec> {
    vec![
        WordSpec::new("bx", Radix::DECIMAL).width(32),
        WordSpec::new("muon", Radix::HEX)
            .repeated(8)
            .width(64)
            .field("phi", Slice::range(9, 0))
            .field("pt", Slice::range(18, 10))
            .field("quality", Slice::range(22, 19))
            .field("eta", Slice::range(31, 23))
            .field("iso", Slice::range(33, 32))
            .field("charge_sign", Slice::bit(34))
            .field("charge_valid", Slice::bit(35))
            .field("reserved", Slice::range(63, 36)),
        calo("eg"),
        calo("tau"),
        WordSpec::new("jet", Radix::HEX)
            .repeated(12)
            .width(32)
            .field("et", Slice::range(10, 0))
            .field("eta", Slice::range(18, 11))
            .field("phi", Slice::range(26, 19))
            .field("reserved", Slice::range(31, 27)),
        scalar_sum("et", "MBT0HFP"),
        scalar_sum("ht", "MBT0HFM"),
        missing_sum("etm", "MBT1HFP"),
        missing_sum("htm", "MBT1HFM"),
        WordSpec::new("empty", Radix::HEX).repeated(8).width(32),
        WordSpec::new("external", Radix::HEX).width(256),
        WordSpec::new("algorithms", Radix::HEX).width(512),
        WordSpec::new("finor", Radix::HEX).width(1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_is_valid() {
        let validated = FormatSchema::new(words()).unwrap();
        assert_eq!(&validated, canonical());
    }

    #[test]
    fn test_canonical_shape() {
        let schema = canonical();
        assert_eq!(schema.len(), 13);
        assert_eq!(schema.total_columns(), 60);

        let names: Vec<&str> = schema.words().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "bx", "muon", "eg", "tau", "jet", "et", "ht", "etm", "htm", "empty",
                "external", "algorithms", "finor"
            ]
        );
    }

    #[test]
    fn test_canonical_columns() {
        let schema = canonical();
        assert_eq!(schema.resolve(0).unwrap().label(), "bx");
        assert_eq!(schema.resolve(1).unwrap().label(), "muon#0");
        assert_eq!(schema.resolve(8).unwrap().label(), "muon#7");
        assert_eq!(schema.resolve(9).unwrap().label(), "eg#0");
        assert_eq!(schema.resolve(45).unwrap().label(), "et");
        assert_eq!(schema.resolve(49).unwrap().label(), "empty#0");
        assert_eq!(schema.resolve(59).unwrap().label(), "finor");
        assert!(schema.resolve(60).is_err());
    }

    #[test]
    fn test_opaque_words() {
        let schema = canonical();
        for name in ["bx", "empty", "external", "algorithms", "finor"] {
            assert!(schema.lookup(name).unwrap().is_opaque(), "{name}");
        }
    }

    #[test]
    fn test_widths() {
        let widths: Vec<u32> = canonical().words().iter().map(|w| w.width).collect();
        assert_eq!(widths, [32, 64, 32, 32, 32, 32, 32, 32, 32, 32, 256, 512, 1]);
    }

    #[test]
    fn test_bx_is_decimal() {
        assert_eq!(canonical().lookup("bx").unwrap().base, Radix::DECIMAL);
    }
}
