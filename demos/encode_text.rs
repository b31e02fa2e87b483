use huffcode::{count_symbols, Tree};

fn main() {
    let s = String::from("Hello my name is Sam!");
    let tree = Tree::from_frequencies(&count_symbols(s.bytes())).unwrap();
    let table = tree.code_table();
    print!("{}", table);

    let out = table.encoder().encode(s.bytes()).unwrap();
    let dec: Result<Vec<u8>, _> = tree.decode(out.iter().by_vals()).collect();

    println!("{:?}", dec.map(String::from_utf8));
}
