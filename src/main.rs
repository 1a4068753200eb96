// Headless runner: loads an iNES ROM, steps the core to completion, and
// emits a per-instruction trace. With a golden log path it diffs against
// that log and exits non-zero on the first mismatch, mirroring the
// automation-mode conformance testing the nestest ROM is built for.

use nes_rs::bus::Bus;
use nes_rs::cartridge::Cartridge;
use nes_rs::cpu::Cpu;
use std::env;
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <rom.nes> [golden-log.log]", args[0]);
        return ExitCode::FAILURE;
    }

    let rom_path = &args[1];
    let golden_log_path = args.get(2);

    let rom_data = match fs::read(rom_path) {
        Ok(data) => data,
        Err(err) => {
            log::error!("failed to read {}: {}", rom_path, err);
            return ExitCode::FAILURE;
        }
    };

    let cartridge = match Cartridge::from_ines_bytes(&rom_data) {
        Ok(cartridge) => cartridge,
        Err(err) => {
            log::error!("failed to parse {}: {}", rom_path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut bus = match Bus::new(cartridge) {
        Ok(bus) => bus,
        Err(err) => {
            log::error!("failed to build bus: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    let golden_lines: Option<Vec<String>> = match golden_log_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(contents) => Some(contents.lines().map(String::from).collect()),
            Err(err) => {
                log::error!("failed to read golden log {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut instruction_num: usize = 0;
    loop {
        let trace_line = cpu.trace(&mut bus);
        println!("{}", trace_line);

        if let Some(lines) = &golden_lines {
            if let Some(golden_line) = lines.get(instruction_num) {
                if !trace_line.starts_with(golden_line.as_str()) && golden_line != &trace_line {
                    eprintln!("trace mismatch at instruction {}", instruction_num + 1);
                    eprintln!("expected: {}", golden_line);
                    eprintln!("actual:   {}", trace_line);
                    return ExitCode::FAILURE;
                }
            }
        }

        match cpu.step(&mut bus) {
            Ok(_) => {}
            Err(err) => {
                log::info!("halted after {} instructions: {}", instruction_num + 1, err);
                break;
            }
        }

        instruction_num += 1;
    }

    ExitCode::SUCCESS
}
