use bitvec::prelude::*;
use huffcode::{count_symbols, CodeTable, Tree};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

#[derive(Serialize, Deserialize)]
struct HuffmanSerialized {
    data: Box<[usize]>,
    bit_len: usize,
    symbol_count: usize,
    table: CodeTable<u8>,
}

impl HuffmanSerialized {
    fn new(bv: BitVec, symbol_count: usize, table: CodeTable<u8>) -> Self {
        let bl = bv.len();

        Self {
            data: bv.into_boxed_bitslice().into_boxed_slice(),
            bit_len: bl,
            symbol_count,
            table,
        }
    }

    fn into_parts(self) -> (BitVec, usize, CodeTable<u8>) {
        let Self { data, bit_len, symbol_count, table } = self;

        let mut bv = BitBox::from_boxed_slice(data).into_bitvec();
        bv.resize(bit_len, false);

        (bv, symbol_count, table)
    }
}

fn main() {
    let fp = env::args().nth(1).expect("Please provide path to input file as first argument.");

    let input_bytes = fs::read(&fp).expect("First argument was not a valid filepath.");

    // encode scope - save code table and packed stream
    {
        let tree = Tree::from_frequencies(&count_symbols(input_bytes.iter().copied())).unwrap();
        let table = tree.code_table();
        fs::write(format!("{}.code", fp), table.to_string()).unwrap();

        let encoded = table.encoder().encode(input_bytes.iter().copied()).unwrap();
        let packed = HuffmanSerialized::new(encoded, input_bytes.len(), table);
        let data = rmp_serde::to_vec(&packed).unwrap();

        fs::write("encoded.mp", data).unwrap();
    }

    // decode scope - rebuild the tree from the text table, then decode
    {
        let file_data = fs::read("encoded.mp").unwrap();
        let packed: HuffmanSerialized = rmp_serde::from_slice(&file_data).unwrap();
        let (enc, symbol_count, packed_table) = packed.into_parts();

        let text = fs::read_to_string(format!("{}.code", fp)).unwrap();
        let table: CodeTable<u8> = text.parse().unwrap();
        assert_eq!(table, packed_table);

        let tree = table.into_tree().unwrap();
        let decoded = tree.decode_counted(enc.iter().by_vals(), symbol_count).unwrap();

        fs::write("decoded.txt", decoded).unwrap();
    }
}
