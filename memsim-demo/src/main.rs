mod address;

use std::io::{self, BufRead, Write};

use clap::{value_t, App, Arg, ArgMatches};
use vm::{
    mmu::{CacheLineView, PageStatus},
    Mmu, TranslationResult,
};

use address::{parse_address, AddressFormat};

fn print_translation(result: &TranslationResult) {
    println!(
        "{:#06X} -> {:#06X} (page {:#04X}, frame {:#04X}) = {}",
        result.virtual_addr, result.physical_addr, result.page_num, result.frame_num, result.value
    );

    for line in result.log() {
        println!("  {}", line);
    }
}

fn print_tlb(mmu: &Mmu) {
    println!("Page Number  Frame Number");
    for (page, frame) in mmu.tlb_snapshot() {
        println!("{:#04X}         {:#04X}", page, frame);
    }
}

fn print_page_table(mmu: &Mmu) {
    println!("Page Number  Frame Number  Status");
    for row in mmu.page_table_snapshot() {
        let status = match row.status {
            PageStatus::Used => "USED",
            PageStatus::Loaded => "LOADED",
        };
        println!("{:#04X}         {:#04X}          {}", row.page, row.frame, status);
    }
    println!("Total Pages: {}", mmu.resident_pages());
}

/// Os três primeiros bytes da linha, como na prévia da GUI.
fn preview(line: &CacheLineView) -> String {
    let bytes: Vec<String> = line.data[..3].iter().map(|b| format!("{:02X}", b)).collect();

    format!("{}...", bytes.join(" "))
}

fn print_cache(mmu: &Mmu) {
    println!("Index  Valid  Tag   Data Preview");
    for line in mmu.cache_snapshot().iter().filter(|line| line.valid) {
        let tag = line.tag.map_or_else(String::new, |tag| format!("{:#04X}", tag));
        println!("{:<6} YES    {:<5} {}", line.index, tag, preview(line));
    }
}

fn print_stats(mmu: &Mmu) {
    println!("{}", mmu.stats_snapshot());
    println!();
    println!("Page Table:");
    println!("  Total Pages: {}", mmu.resident_pages());
}

fn process(mmu: &mut Mmu, raw: &str, format: AddressFormat) {
    match parse_address(raw, format) {
        Ok(addr) => print_translation(&mmu.translate(addr)),
        Err(e) => {
            log::warn!("demo: endereço rejeitado {:?}", raw);
            eprintln!("Error: {}", e);
        }
    }
}

fn seed_from(matches: &ArgMatches) -> Result<Option<u64>, clap::Error> {
    if !matches.is_present("seed") {
        return Ok(None);
    }

    value_t!(matches, "seed", u64).map(Some)
}

fn interactive(mmu: &mut Mmu, format: AddressFormat) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim() {
            "quit" | "exit" => return Ok(()),
            "reset" => {
                mmu.reset();
                println!("Simulator reset successfully!");
            }
            "tlb" => print_tlb(mmu),
            "pt" => print_page_table(mmu),
            "cache" => print_cache(mmu),
            "stats" => print_stats(mmu),
            raw => process(mmu, raw, format),
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let matches = App::new("memsim-demo")
        .version("0.1")
        .about("Simula TLB, tabela de páginas e cache para cada endereço virtual")
        .arg(
            Arg::with_name("address")
                .value_name("ADDRESS")
                .multiple(true)
                .help("virtual addresses in [0x0000, 0xFFFF]"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .takes_value(true)
                .help("seed for the initial memory content, must be decimal int")
                .validator(|raw| {
                    raw.parse::<u64>()
                        .map(|_| ())
                        .map_err(|_| String::from("--seed expect a decimal int"))
                }),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .possible_values(&["hex", "decimal"])
                .help("base of addresses without a 0x prefix")
                .default_value("hex"),
        )
        .arg(
            Arg::with_name("interactive")
                .short("i")
                .long("interactive")
                .help("read addresses and commands (reset, tlb, pt, cache, stats, quit) from stdin"),
        )
        .get_matches();

    let format = match matches.value_of("format").unwrap_or_default() {
        "decimal" => AddressFormat::Decimal,
        _ => AddressFormat::Hex,
    };

    let mut mmu = match seed_from(&matches).unwrap_or_else(|e| e.exit()) {
        Some(seed) => Mmu::with_seed(seed),
        None => Mmu::new(),
    };

    if let Some(addresses) = matches.values_of("address") {
        for raw in addresses {
            process(&mut mmu, raw, format);
        }
    }

    if matches.is_present("interactive") {
        interactive(&mut mmu, format)?;
    } else {
        println!();
        print_stats(&mmu);
    }

    Ok(())
}
