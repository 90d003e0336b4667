use flagpack::{Padding, Transcoder, TranscoderBuilder};
use proptest::prelude::*;

fn padding() -> impl Strategy<Value = Padding> {
    prop_oneof![Just(Padding::False), Just(Padding::True), Just(Padding::Unknown)]
}

fn build(len: usize, padding: Padding) -> Transcoder {
    TranscoderBuilder::positional(len).padding(padding).build().unwrap()
}

proptest! {
    #[test]
    fn round_trip_preserves_values(
        values in prop::collection::vec(any::<bool>(), 0..=63),
        padding in padding(),
    ) {
        let transcoder = build(values.len(), padding);
        let protected = transcoder.encode(&values).unwrap();
        let decoded = transcoder.decode_values(protected).unwrap();
        let expected: Vec<_> = values.iter().copied().map(Some).collect();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn sentinel_bounds_protected_integer(values in prop::collection::vec(any::<bool>(), 0..=63)) {
        let n = values.len() as u32;
        let protected = build(values.len(), Padding::False).encode(&values).unwrap() as u128;
        prop_assert!(protected >= 1u128 << n);
        prop_assert!(protected < 1u128 << (n + 1));
    }

    #[test]
    fn appended_fields_take_padding(
        values in prop::collection::vec(any::<bool>(), 0..=50),
        added in 0usize..=13,
        padding in padding(),
    ) {
        let protected = build(values.len(), Padding::False).encode(&values).unwrap();
        let decoded = build(values.len() + added, padding).decode_values(protected).unwrap();

        let mut expected: Vec<_> = values.iter().copied().map(Some).collect();
        expected.extend(std::iter::repeat(padding.fill()).take(added));
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn encode_rejects_any_other_length(len in 0usize..=20, actual in 0usize..=20) {
        prop_assume!(len != actual);
        let transcoder = build(len, Padding::False);
        prop_assert!(transcoder.encode(vec![true; actual]).is_err());
    }

    #[test]
    fn signed_storage_round_trips(values in prop::collection::vec(any::<bool>(), 0..=30)) {
        let transcoder: Transcoder<i32> = TranscoderBuilder::positional(values.len()).build().unwrap();
        let protected = transcoder.encode(&values).unwrap();
        prop_assert!(protected > 0);
        let decoded: Vec<_> = transcoder.decode_values(protected).unwrap().into_iter().flatten().collect();
        prop_assert_eq!(decoded, values);
    }
}
