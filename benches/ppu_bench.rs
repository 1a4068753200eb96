// PPU Benchmarks
// Performance benchmarks for PPU clocking and rendering

use criterion::{criterion_group, criterion_main, Criterion};
use nes_rs::cartridge::mappers::create_mapper;
use nes_rs::cartridge::{Cartridge, Mapper, Mirroring};
use nes_rs::ppu::Ppu;
use std::hint::black_box;

fn test_mapper() -> Box<dyn Mapper> {
    let cartridge = Cartridge {
        prg_rom: vec![0; 16 * 1024],
        chr_rom: vec![0xAA; 8 * 1024],
        trainer: None,
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        has_battery: false,
    };
    create_mapper(cartridge).unwrap()
}

/// Benchmark raw PPU dot clocking, the hottest loop in the core (one call
/// per CPU cycle, three per CPU instruction on average).
fn bench_ppu_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_clock");

    group.bench_function("single_dot", |b| {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);

        b.iter(|| {
            black_box(ppu.clock(mapper.as_ref()));
        });
    });

    group.bench_function("one_scanline", |b| {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);

        b.iter(|| {
            for _ in 0..341 {
                black_box(ppu.clock(mapper.as_ref()));
            }
        });
    });

    group.finish();
}

/// Benchmark a full frame's worth of clocking, which includes one
/// whole-nametable render pass at the pre-render/vblank boundary.
fn bench_ppu_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_frame");
    group.sample_size(20);

    group.bench_function("one_frame", |b| {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);

        b.iter(|| loop {
            if black_box(ppu.clock(mapper.as_ref())) {
                break;
            }
        });
    });

    group.finish();
}

/// Benchmark the $2007 PPUDATA register port under sustained access, as a
/// CPU-driven VRAM upload loop would exercise it.
fn bench_ppu_data_port(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_data_port");

    group.bench_function("nametable_write_sequence", |b| {
        let mut ppu = Ppu::new(Mirroring::Horizontal);

        b.iter(|| {
            ppu.write_addr(0x20);
            ppu.write_addr(0x00);
            for i in 0..256u16 {
                ppu.write_data(black_box((i & 0xFF) as u8));
            }
        });
    });

    group.bench_function("palette_read_sequence", |b| {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);

        b.iter(|| {
            ppu.write_addr(0x3F);
            ppu.write_addr(0x00);
            for _ in 0..32 {
                black_box(ppu.read_data(mapper.as_ref()));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_ppu_clock,
    bench_ppu_frame,
    bench_ppu_data_port
);
criterion_main!(benches);
