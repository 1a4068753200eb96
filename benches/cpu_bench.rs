// CPU Benchmarks
// Performance benchmarks for CPU instruction execution

use criterion::{criterion_group, criterion_main, Criterion};
use nes_rs::cartridge::{Cartridge, Mirroring};
use nes_rs::{Bus, Cpu};
use std::hint::black_box;

fn cartridge_from_program(program: &[u8]) -> Cartridge {
    let mut prg_rom = vec![0xEAu8; 32 * 1024]; // 32KiB: no bank mirroring, full address space is program
    prg_rom[..program.len()].copy_from_slice(program);
    Cartridge {
        prg_rom,
        chr_rom: vec![0; 8 * 1024],
        trainer: None,
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        has_battery: false,
    }
}

/// Benchmark CPU instruction execution.
/// Tests various common instruction patterns to measure dispatch and execution performance.
fn bench_cpu_instructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_instructions");

    group.bench_function("nop", |b| {
        let cartridge = cartridge_from_program(&vec![0xEA; 32 * 1024]);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        b.iter(|| {
            cpu.step(black_box(&mut bus)).unwrap();
        });
    });

    group.bench_function("lda_immediate", |b| {
        let mut program = vec![0u8; 32 * 1024];
        for chunk in program.chunks_exact_mut(2) {
            chunk[0] = 0xA9; // LDA immediate
            chunk[1] = 0x42;
        }
        let cartridge = cartridge_from_program(&program);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        b.iter(|| {
            cpu.step(black_box(&mut bus)).unwrap();
        });
    });

    group.bench_function("adc_immediate", |b| {
        let mut program = vec![0u8; 32 * 1024];
        for chunk in program.chunks_exact_mut(2) {
            chunk[0] = 0x69; // ADC immediate
            chunk[1] = 0x01;
        }
        let cartridge = cartridge_from_program(&program);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        b.iter(|| {
            cpu.step(black_box(&mut bus)).unwrap();
        });
    });

    group.bench_function("sta_absolute", |b| {
        let mut program = vec![0u8; 32 * 1024];
        for chunk in program.chunks_exact_mut(3) {
            chunk[0] = 0x8D; // STA absolute
            chunk[1] = 0x00;
            chunk[2] = 0x02;
        }
        let cartridge = cartridge_from_program(&program);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        b.iter(|| {
            cpu.step(black_box(&mut bus)).unwrap();
        });
    });

    group.bench_function("jmp_absolute", |b| {
        let mut program = vec![0xEAu8; 32 * 1024];
        // JMP $C000, a self-loop.
        let offset = 0xC000 - 0x8000;
        program[offset] = 0x4C;
        program[offset + 1] = 0x00;
        program[offset + 2] = 0xC0;
        let cartridge = cartridge_from_program(&program);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.pc = 0xC000;

        b.iter(|| {
            cpu.step(black_box(&mut bus)).unwrap();
        });
    });

    group.finish();
}

/// Benchmark a sequence of mixed instructions (realistic workload).
fn bench_instruction_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("instruction_sequences");

    group.bench_function("typical_sequence", |b| {
        let mut program = vec![0xEAu8; 32 * 1024];
        let offset = 0xC000 - 0x8000;
        program[offset..offset + 11].copy_from_slice(&[
            0xA9, 0x00, // LDA #$00
            0x8D, 0x00, 0x02, // STA $0200
            0xA2, 0x05, // LDX #$05
            0xE8, // INX
            0xCA, // DEX
            0xD0, // BNE back to LDA
        ]);
        program[offset + 11] = (-10i8) as u8;
        let cartridge = cartridge_from_program(&program);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.pc = 0xC000;

        b.iter(|| {
            for _ in 0..11 {
                cpu.step(black_box(&mut bus)).unwrap();
            }
        });
    });

    group.finish();
}

/// Benchmark CPU execution over multiple frames worth of cycles.
fn bench_frame_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_execution");
    group.sample_size(20);

    group.bench_function("1000_cycles", |b| {
        let cartridge = cartridge_from_program(&vec![0xEA; 32 * 1024]);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        b.iter(|| {
            let start_cycles = cpu.cycles;
            while cpu.cycles - start_cycles < 1000 {
                cpu.step(black_box(&mut bus)).unwrap();
            }
        });
    });

    group.bench_function("29780_cycles_one_frame", |b| {
        let cartridge = cartridge_from_program(&vec![0xEA; 32 * 1024]);
        let mut bus = Bus::new(cartridge).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        b.iter(|| {
            // NES CPU runs at ~1.789773 MHz; at 60 FPS that's ~29,780 cycles per frame.
            let start_cycles = cpu.cycles;
            while cpu.cycles - start_cycles < 29780 {
                cpu.step(black_box(&mut bus)).unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cpu_instructions,
    bench_instruction_sequence,
    bench_frame_execution
);
criterion_main!(benches);
