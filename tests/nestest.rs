// Nestest ROM integration test: runs the nestest CPU conformance ROM in
// automation mode and diffs the per-instruction trace against the golden
// log. Ignored by default since the ROM/log fixtures aren't vendored.

use nes_rs::cartridge::{Cartridge, Mirroring};
use nes_rs::bus::Bus;
use nes_rs::cpu::Cpu;
use std::fs;

#[test]
#[ignore] // Run with: cargo test --test nestest -- --ignored --nocapture
fn nestest_cpu_trace_matches_golden_log() {
    let rom_path = "tests/nes-test-rom/other/nestest.nes";
    let rom_data = fs::read(rom_path).expect("failed to load nestest ROM");
    let cartridge = Cartridge::from_ines_bytes(&rom_data).expect("failed to parse nestest ROM");

    let log_path = "tests/nes-test-rom/other/nestest.log";
    let golden_log = fs::read_to_string(log_path).expect("failed to load golden log");
    let golden_lines: Vec<&str> = golden_log.lines().collect();

    let mut bus = Bus::new(cartridge).expect("failed to build bus from nestest ROM");
    let mut cpu = Cpu::new();

    // Automation mode: start at $C000 instead of the reset vector.
    cpu.pc = 0xC000;
    cpu.cycles = 7;

    let mut mismatches = Vec::new();
    let max_instructions = 5003;

    for instruction_num in 0..max_instructions {
        let trace_line = cpu.trace(&mut bus);

        if let Some(&golden_line) = golden_lines.get(instruction_num) {
            if !compare_trace_lines(&trace_line, golden_line) {
                mismatches.push((instruction_num + 1, trace_line.clone(), golden_line.to_string()));
                if mismatches.len() <= 10 {
                    println!("\nMismatch at instruction {}:", instruction_num + 1);
                    println!("Expected: {}", golden_line);
                    println!("Got:      {}", trace_line);
                }
            }
        }

        if cpu.step(&mut bus).is_err() {
            break;
        }
    }

    println!("\nTotal mismatches: {}", mismatches.len());
    assert!(mismatches.is_empty(), "{} trace mismatches against the golden log", mismatches.len());
}

/// Compares trace lines up through the register dump, then separately
/// compares the cycle count (PPU dot/scanline fields aren't tracked here).
fn compare_trace_lines(actual: &str, expected: &str) -> bool {
    let actual_registers = actual.find("SP:").map(|p| &actual[..p + 5]).unwrap_or(actual);
    let expected_registers = expected.find("SP:").map(|p| &expected[..p + 5]).unwrap_or(expected);

    let actual_cyc = actual.split("CYC:").nth(1).map(str::trim);
    let expected_cyc = expected.split("CYC:").nth(1).map(str::trim);

    actual_registers == expected_registers && actual_cyc == expected_cyc
}

#[test]
fn nestest_quick_smoke_test() {
    let mut cartridge = Cartridge {
        prg_rom: vec![0xEA; 16 * 1024],
        chr_rom: vec![0; 8 * 1024],
        trainer: None,
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        has_battery: false,
    };
    cartridge.prg_rom[0] = 0xA9; // LDA #$42
    cartridge.prg_rom[1] = 0x42;
    cartridge.prg_rom[2] = 0x85; // STA $00
    cartridge.prg_rom[3] = 0x00;
    cartridge.prg_rom[4] = 0x00; // BRK

    let mut bus = Bus::new(cartridge).unwrap();
    let mut cpu = Cpu::new();
    cpu.pc = 0x8000;

    assert!(cpu.step(&mut bus).unwrap());
    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.pc, 0x8002);

    assert!(cpu.step(&mut bus).unwrap());
    assert_eq!(bus.read(0x00), 0x42);
    assert_eq!(cpu.pc, 0x8004);
}
