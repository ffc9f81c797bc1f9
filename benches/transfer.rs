use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use satchel::data::{DataManager, LoadoutConfig};
use satchel::{EquipSlot, Loadout, Player, SlotAddress, TransferEngine};

const INVENTORY_SIZES: &[usize] = &[24, 96, 384];

fn engine(capacity: usize) -> TransferEngine {
    let config = LoadoutConfig {
        inventory_capacity: capacity,
        ..LoadoutConfig::default()
    };
    let data = DataManager::load_from(std::path::Path::new("does/not/exist"));
    let mut engine = TransferEngine::new(Loadout::new(&config), Player::default());
    for template in ["pickaxe", "chain_helm", "leather_armor"] {
        if let Some(item) = data.create_item(template, 1) {
            let _ = engine.give(item);
        }
    }
    for _ in 0..capacity / 2 {
        if let Some(rock) = data.create_item("rock", 40) {
            let _ = engine.give(rock);
        }
    }
    engine
}

fn bench_storage_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage_shuffle");
    for &size in INVENTORY_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut engine = engine(size);
            let last = size - 1;
            b.iter(|| {
                let _ = engine.begin_pick(SlotAddress::inventory(0));
                black_box(engine.drop(SlotAddress::inventory(last)).ok());
                let _ = engine.begin_pick(SlotAddress::inventory(last));
                black_box(engine.drop(SlotAddress::inventory(0)).ok());
            });
        });
    }
    group.finish();
}

fn bench_equip_cycle(c: &mut Criterion) {
    c.bench_function("equip_cycle", |b| {
        let mut engine = engine(24);
        b.iter(|| {
            black_box(engine.auto_equip(SlotAddress::inventory(1)).ok());
            black_box(engine.unequip(EquipSlot::Head).ok());
        });
    });
}

criterion_group!(benches, bench_storage_shuffle, bench_equip_cycle);
criterion_main!(benches);
