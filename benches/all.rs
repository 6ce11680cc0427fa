use frodo_pke::{
    decrypt, encrypt, gen_keypair, LatticeOps, Params, FRODO_1344, FRODO_640, FRODO_976,
};

use criterion::{criterion_group, criterion_main, Criterion};

fn bench_params(c: &mut Criterion, params: &Params) {
    let mut rng = rand::thread_rng();
    let name = params.name();

    let seed = vec![0u8; params.seed_a_len()];
    c.bench_function(&format!("{name}-gen-matrix"), |b| {
        b.iter(|| params.gen(&seed).unwrap())
    });

    c.bench_function(&format!("{name}-gen-keypair"), |b| {
        b.iter(|| gen_keypair(params, &mut rng).unwrap())
    });
    let (sk, pk) = gen_keypair(params, &mut rng).unwrap();

    let msg = vec![0u8; params.message_len()];
    c.bench_function(&format!("{name}-encrypt"), |b| {
        b.iter(|| encrypt(params, &pk, &msg, &mut rng).unwrap())
    });
    let ct = encrypt(params, &pk, &msg, &mut rng).unwrap();

    c.bench_function(&format!("{name}-decrypt"), |b| {
        b.iter(|| decrypt(params, &sk, &ct).unwrap())
    });
}

fn frodo640(c: &mut Criterion) {
    bench_params(c, &FRODO_640);
}

fn frodo976(c: &mut Criterion) {
    bench_params(c, &FRODO_976);
}

fn frodo1344(c: &mut Criterion) {
    bench_params(c, &FRODO_1344);
}

criterion_group!(benches, frodo640, frodo976, frodo1344);
criterion_main!(benches);
