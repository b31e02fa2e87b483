use bitvec::prelude::*;
use huffcode::{count_symbols, CodeTable, FrequencyTable, HuffmanError, MalformedCode, Node, Tree};
use std::collections::HashSet;

fn classic() -> FrequencyTable<char> {
    [('a', 5), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)]
        .into_iter()
        .collect()
}

#[test]
fn classic_example_is_optimal() {
    let freq = classic();
    let tree = Tree::from_frequencies(&freq).unwrap();
    let table = tree.code_table();

    assert_eq!(table.len(), 6);
    assert_eq!(table.encoded_len(&freq), 224);
}

#[test]
fn codes_are_prefix_free() {
    let freq = count_symbols("the quick brown fox jumps over the lazy dog".bytes());
    let table = Tree::from_frequencies(&freq).unwrap().code_table();

    for (i, (_, a)) in table.iter().enumerate() {
        for (j, (_, b)) in table.iter().enumerate() {
            if i != j {
                assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
            }
        }
    }
}

#[test]
fn table_round_trip_through_text() {
    let freq: FrequencyTable<u16> = (0u16..=256).map(|s| (s, u64::from(s % 17) + 1)).collect();
    let table = Tree::from_frequencies(&freq).unwrap().code_table();

    let text = table.to_string();
    let rebuilt = text.parse::<CodeTable<u16>>().unwrap().into_tree().unwrap();

    let expected: HashSet<_> = table.into_iter().collect();
    let actual: HashSet<_> = rebuilt.code_table().into_iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn rebuilt_tree_matches_built_tree() {
    let tree = Tree::from_frequencies(&classic()).unwrap();
    let rebuilt = tree.code_table().into_tree().unwrap();
    assert_eq!(rebuilt, tree);
}

#[test]
fn decode_reproduces_encoded_symbols() {
    let message = "mississippi river banks";
    let tree = Tree::from_frequencies(&count_symbols(message.chars())).unwrap();
    let table = tree.code_table();

    let mut bits = BitVec::<usize, Lsb0>::new();
    for ch in message.chars() {
        let (_, code) = table.iter().find(|(s, _)| **s == ch).unwrap();
        bits.extend_from_bitslice(code.as_bitslice());
    }

    let decoded: Result<String, _> = tree.decode(bits.iter().by_vals()).collect();
    assert_eq!(decoded.unwrap(), message);
}

#[test]
fn single_symbol_alphabet() {
    let tree = Tree::build(vec![('x', 7)]).unwrap();
    assert_eq!(tree.root(), &Node::Leaf('x'));

    let table = tree.code_table();
    assert_eq!(table.len(), 1);
    let (symbol, code) = &table.entries()[0];
    assert_eq!(*symbol, 'x');
    assert!(code.is_empty());
}

#[test]
fn truncated_stream_is_an_error() {
    let tree = Tree::build(vec![(1u8, 3), (2, 3), (3, 3), (4, 3)]).unwrap();
    let out: Vec<_> = tree.decode(vec![false].into_iter()).collect();
    assert_eq!(out, vec![Err(HuffmanError::TruncatedStream { consumed: 1 })]);
}

#[test]
fn malformed_code_text_is_rejected() {
    let err = "97\n0\n98\n12\n".parse::<CodeTable<u8>>().unwrap_err();
    assert!(matches!(
        err,
        HuffmanError::MalformedCode {
            reason: MalformedCode::InvalidBit('2'),
            ..
        }
    ));
}

#[test]
fn non_prefix_free_table_is_rejected() {
    let table: CodeTable<u8> = "97\n0\n98\n01\n99\n1\n".parse().unwrap();
    assert_eq!(
        table.into_tree(),
        Err(HuffmanError::MalformedCode {
            entry: 1,
            reason: MalformedCode::PrefixConflict("01".to_string()),
        })
    );
}

#[test]
fn code_table_round_trip_through_msgpack() {
    let tree = Tree::from_frequencies(&count_symbols("hello, packed world".bytes())).unwrap();
    let table = tree.code_table();

    let data = rmp_serde::to_vec(&table).unwrap();
    let back: CodeTable<u8> = rmp_serde::from_slice(&data).unwrap();

    assert_eq!(back.into_tree().unwrap(), tree);
}
