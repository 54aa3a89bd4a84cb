use std::io::Read;

use larch_scan::Scanner;

fn main() {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source).unwrap();

    for line in Scanner::new(&source) {
        println!("{:?}", line);
    }
}
