use frodo_pke::{decrypt, encrypt, gen_keypair, Ciphertext, PublicKey, FRODO_640};

fn main() -> Result<(), frodo_pke::Error> {
    let mut rng = rand::thread_rng();
    let params = FRODO_640;

    // Generate a keypair
    let (sk, pk) = gen_keypair(&params, &mut rng)?;

    // Serialize the public key, maybe to send it to someone, and read it back
    let pk_bytes = pk.to_bytes(&params);
    assert_eq!(pk_bytes.len(), params.public_key_len());
    let pk = PublicKey::from_bytes(&params, &pk_bytes)?;

    // Encrypt a message. Messages are exactly params.message_len() bytes
    let msg = *b"sixteen byte msg";
    let ct = encrypt(&params, &pk, &msg, &mut rng)?;

    // Ciphertexts serialize the same way
    let ct_bytes = ct.to_bytes(&params);
    let receiver_ct = Ciphertext::from_bytes(&params, &ct_bytes)?;

    // Use the secret key to decrypt the ciphertext
    let recovered = decrypt(&params, &sk, &receiver_ct)?;
    assert_eq!(recovered, msg);

    println!("FrodoPKE ran successfully");
    Ok(())
}
