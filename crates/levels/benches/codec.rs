use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tig_levels::{
    BackgroundChange, BlockObject, BlocksFall, BlocksRise, GravityChange, LevelCodec,
    LevelDocument,
};

fn large_level() -> LevelDocument {
    let mut level = LevelDocument::new();
    for i in 0..10_000 {
        let x = i * 30;
        match i % 3 {
            0 => level.add_block(BlockObject::platform(x, 30)),
            1 => level.add_block(BlockObject::spike(x, 0)),
            _ => level.add_block(BlockObject::pit(x, x + 60)),
        };
    }
    for i in 0..500 {
        if i % 10 == 0 {
            level.add_background(BackgroundChange::custom_texture(i * 600, format!("bg/{}.png", i)));
        } else {
            level.add_background(BackgroundChange::color(i * 600, i % 6));
        }
        level.add_gravity(GravityChange::new(i * 600 + 300));
        level.add_fall(BlocksFall::new(i * 600, i * 600 + 120));
        level.add_rise(BlocksRise::new(i * 600 + 200, i * 600 + 200));
    }
    level.set_end_pos(300_030);
    level
}

fn bench_codec(c: &mut Criterion) {
    let level = large_level();
    let bytes = LevelCodec::encode(&level);

    c.bench_function("encode_large_level", |b| {
        b.iter(|| LevelCodec::encode(black_box(&level)))
    });

    c.bench_function("decode_large_level", |b| {
        b.iter(|| LevelCodec::decode(black_box(&bytes)))
    });

    c.bench_function("merge_adjacent_pits", |b| {
        b.iter(|| {
            let mut level = level.clone();
            level.merge_adjacent_pits()
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
