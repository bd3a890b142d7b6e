//! Prints a fresh base64 signing key for `JWT__SECRET`.

use argon2::password_hash::rand_core::OsRng;

fn main() {
    eprintln!("Generated signing key (store it in your secret configuration):");
    println!("{}", auth::generate_secret(&mut OsRng));
}
