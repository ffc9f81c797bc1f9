//! Satchel - Entry Point
//!
//! A line-oriented console over the transfer engine. Each command stands in
//! for one UI gesture: pick, drop, cancel, and the direct equip operations.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use satchel::containers::{Container, ContainerId, SlotAddress, SlotKey};
use satchel::data::{export_default_data, DataManager, DEFAULT_DATA_DIR};
use satchel::items::{EquipSlot, ItemId};
use satchel::progression::{Player, Stat};
use satchel::transfer::{DragSession, TransferEngine};
use satchel::Loadout;

const HELP: &str = "\
commands:
  pick <addr>          pick up the item at an address
  drop <addr>          drop the held item
  cancel               put the held item back
  equip <addr>         equip into the item's natural slot
  unequip <slot>       move an equipped item to the inventory
  give <id> [count]    spawn an item from a template
  open|close <bag>     open or close a bag by id
  active <n>           select quick slot n
  show                 print every container
  json                 dump the loadout as JSON
  export               write default data files
  quit
addresses: inventory:3  equipment:rightHand  quick:2  bag:satchel:0";

/// One parsed console line
#[derive(Debug)]
enum Command {
    Pick(SlotAddress),
    Drop(SlotAddress),
    Cancel,
    Equip(SlotAddress),
    Unequip(EquipSlot),
    Give(String, u32),
    Open(ItemId, bool),
    Active(usize),
    Show,
    Json,
    Export,
    Help,
    Quit,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Satchel v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = data_directory();
    let data = DataManager::load_from(&data_dir);
    let mut engine = TransferEngine::new(Loadout::new(&data.config), Player::default());
    engine
        .loadout_mut()
        .inventory_mut()
        .set_observer(Box::new(|id: &ContainerId, key: &SlotKey| {
            log::debug!("Redraw {}:{}", id, key);
        }));

    for (template, count) in [("pickaxe", 1), ("rock", 3), ("chain_helm", 1), ("satchel", 1)] {
        give(&mut engine, &data, template, count)?;
    }

    println!("{}", HELP);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if matches!(command, Command::Quit) {
            break;
        }
        if let Err(e) = run_command(&mut engine, &data, &data_dir, command) {
            println!("{}", e);
        }
    }

    log::info!("Satchel shut down cleanly");
    Ok(())
}

/// `assets/data` when present, otherwise the per-user data directory
fn data_directory() -> PathBuf {
    use directories::ProjectDirs;

    let local = PathBuf::from(DEFAULT_DATA_DIR);
    if local.exists() {
        return local;
    }
    if let Some(proj_dirs) = ProjectDirs::from("com", "satchel", "Satchel") {
        proj_dirs.data_local_dir().join("data")
    } else {
        local
    }
}

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let arg = words.next();
    let address = |arg: Option<&str>| -> Result<SlotAddress> {
        let text = arg.ok_or_else(|| anyhow!("{} needs an address", verb))?;
        Ok(text.parse::<SlotAddress>()?)
    };

    let command = match verb {
        "pick" => Command::Pick(address(arg)?),
        "drop" => Command::Drop(address(arg)?),
        "cancel" => Command::Cancel,
        "equip" => Command::Equip(address(arg)?),
        "unequip" => {
            let slot = arg.ok_or_else(|| anyhow!("unequip needs a slot"))?;
            Command::Unequip(slot.parse::<EquipSlot>().map_err(|e| anyhow!(e))?)
        }
        "give" => {
            let template = arg.ok_or_else(|| anyhow!("give needs a template id"))?;
            let count = match words.next() {
                Some(n) => n.parse::<u32>().with_context(|| format!("bad count '{}'", n))?,
                None => 1,
            };
            Command::Give(template.to_string(), count)
        }
        "open" | "close" => {
            let bag = arg.ok_or_else(|| anyhow!("{} needs a bag id", verb))?;
            Command::Open(ItemId::new(bag), verb == "open")
        }
        "active" => {
            let n = arg.ok_or_else(|| anyhow!("active needs a slot number"))?;
            Command::Active(n.parse::<usize>().with_context(|| format!("bad slot number '{}'", n))?)
        }
        "show" => Command::Show,
        "json" => Command::Json,
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}' (try help)", other),
    };
    Ok(command)
}

fn run_command(
    engine: &mut TransferEngine,
    data: &DataManager,
    data_dir: &Path,
    command: Command,
) -> Result<()> {
    match command {
        Command::Pick(address) => {
            engine.begin_pick(address)?;
            if let Some(held) = engine.session().held() {
                println!("holding {} x{}", held.name, held.count);
            }
        }
        Command::Drop(address) => {
            let outcome = engine.drop(address)?;
            println!("{:?}", outcome);
        }
        Command::Cancel => {
            if !engine.cancel() {
                println!("not holding anything");
            }
        }
        Command::Equip(address) => {
            let outcome = engine.auto_equip(address)?;
            println!("{:?}", outcome);
        }
        Command::Unequip(slot) => {
            let key = engine.unequip(slot)?;
            println!("moved to inventory:{}", key);
        }
        Command::Give(template, count) => give(engine, data, &template, count)?,
        Command::Open(bag, open) => {
            if !engine.set_bag_open(&bag, open) {
                bail!("no bag '{}' carried or worn", bag);
            }
        }
        Command::Active(n) => engine.set_active_quick_slot(SlotKey::Quick(n))?,
        Command::Show => show(engine),
        Command::Json => println!("{}", serde_json::to_string_pretty(engine.loadout())?),
        Command::Export => {
            export_default_data(data_dir)?;
            println!("wrote defaults to {}", data_dir.display());
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

/// Spawn from a template into the inventory
fn give(engine: &mut TransferEngine, data: &DataManager, template: &str, count: u32) -> Result<()> {
    let item = data
        .create_item(template, count)
        .ok_or_else(|| anyhow!("no item template '{}'", template))?;
    match engine.give(item) {
        Ok(key) => {
            println!("received into inventory:{}", key);
            Ok(())
        }
        Err(item) => bail!("inventory full, {} dropped on the floor", item.name),
    }
}

fn show(engine: &TransferEngine) {
    let loadout = engine.loadout();

    println!("-- inventory");
    let inventory = loadout.inventory();
    for index in 0..inventory.capacity() {
        if let Some(item) = inventory.get_index(index) {
            println!("  {:>2}  {} x{}", index, item.name, item.count);
        }
    }

    println!("-- equipment");
    for &slot in EquipSlot::all() {
        let name = loadout
            .equipment()
            .get_slot(slot)
            .map_or("-", |item| item.name.as_str());
        println!("  {:<10} {}", slot.name(), name);
    }

    println!("-- quick slots (active {})", loadout.quick().active_key());
    for key in loadout.quick().keys() {
        if let Some(item) = loadout.quick().get(&key) {
            println!("  {:<10} {} x{}", key, item.name, item.count);
        }
    }

    for bag_item in loadout.all_items().into_iter().filter(|item| item.is_bag()) {
        let Some(bag) = bag_item.as_bag() else { continue };
        let state = if bag.open { "open" } else { "closed" };
        println!("-- bag {} ({}, {} slots)", bag_item.id, state, bag.contents.capacity());
        if bag.open {
            for item in bag.contents.iter_items() {
                println!("      {} x{}", item.name, item.count);
            }
        }
    }

    let player = engine.player();
    let stats: Vec<String> = [
        Stat::Strength,
        Stat::Dexterity,
        Stat::Intelligence,
        Stat::Attack,
        Stat::Defense,
        Stat::MiningPower,
    ]
    .iter()
    .map(|&stat| format!("{} {}", stat, player.stat(stat)))
    .collect();
    println!("-- {} (level {}): {}", player.name, player.level, stats.join(", "));

    if let DragSession::Holding { item, source } = engine.session() {
        println!("-- holding {} x{} from {}", item.name, item.count, source);
    }
}
