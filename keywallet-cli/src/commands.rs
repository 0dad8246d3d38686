//! Command handlers

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use tracing::debug;
use zeroize::Zeroize;

use keywallet::address;
use keywallet::crypto::keys::{DerivationPath, ExtendedKey};
use keywallet::crypto::mnemonic::{
    entropy_to_mnemonic, generate_entropy, mnemonic_to_seed, DEFAULT_ENTROPY_SIZE,
};
use keywallet::keystore::Keystore;

use crate::prompt;

#[derive(Subcommand)]
pub enum Commands {
    /// Derive a key from a named seed and print its address
    ///
    /// Path is defined as: m / purpose' / coin_type' / account' / change /
    /// address_index. With --mnemonic the path argument is an arbitrary
    /// phrase hashed into a derivation path instead.
    Derive(DeriveArgs),
    /// Generate a new seed and optionally store it under a name
    New(NewArgs),
    /// List stored seed names
    List,
}

#[derive(Args)]
pub struct DeriveArgs {
    /// Name of the stored seed
    pub seed: String,
    /// Derivation path, e.g. m/44'/138'/0'/0/0
    pub path: String,
    /// Use the path argument as a phrase hashed into a path
    #[arg(short = 'm', long = "mnemonic")]
    pub mnemonic_path: bool,
    /// Prompt for a custom seed derivation password
    #[arg(short = 'u', long)]
    pub custom: bool,
    /// Address network ID byte in hex
    #[arg(short = 'a', long = "addr", default_value = "0x0")]
    pub addr: String,
    /// Bech32 address format
    #[arg(long)]
    pub bech: bool,
    /// BTC address format
    #[arg(short, long)]
    pub btc: bool,
    /// Print the extended private and public keys
    #[arg(short, long)]
    pub print_key: bool,
}

#[derive(Args)]
pub struct NewArgs {
    /// Name of the seed
    pub name: Option<String>,
    /// Name of the seed (flag form, takes precedence)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name_flag: Option<String>,
    /// Size of the seed entropy in bytes
    #[arg(short, long, default_value_t = DEFAULT_ENTROPY_SIZE)]
    pub size: usize,
}

pub fn execute_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Derive(args) => handle_derive(args),
        Commands::New(args) => handle_new(args),
        Commands::List => handle_list(),
    }
}

fn open_default_keystore() -> anyhow::Result<Keystore> {
    let dir = Keystore::default_dir()?;
    debug!(dir = %dir.display(), "opening keystore");
    Ok(Keystore::open(dir)?)
}

fn handle_derive(args: DeriveArgs) -> anyhow::Result<()> {
    // Validate the format flags before prompting for anything
    let network_id = address::parse_network_id(&args.addr)?;
    let path = if args.mnemonic_path {
        DerivationPath::from_phrase(&args.path)
    } else {
        args.path.parse::<DerivationPath>()?
    };

    let store = open_default_keystore()?;
    if !store.has(&args.seed) {
        bail!("seed {:?} was not found", args.seed);
    }

    let password = prompt::line("seed password")?;
    let mnemonic = store.unseal(&args.seed, &password)?;

    let passphrase = if args.custom {
        Some(prompt::line("derivation password")?)
    } else {
        None
    };

    let mut seed = mnemonic_to_seed(&mnemonic, passphrase.as_deref())?;
    let master = ExtendedKey::master(&seed);
    seed.zeroize();
    let key = master?.derive_path(&path)?;
    debug!(%path, "derived key");

    let public_key = key.public_key();
    let addr = if args.bech {
        address::bech32_address(&public_key, network_id)?
    } else if network_id != 0 || args.btc {
        address::base58_address(&public_key, network_id)
    } else {
        address::ethereum_address(&public_key)
    };

    if args.print_key {
        println!("Public key: {}", key.to_xpub());
        println!("Private key: {}", key.to_xprv());
    }
    println!("Address: {}", addr);
    println!("Key ID: {}", address::key_id(&public_key));
    Ok(())
}

fn handle_new(args: NewArgs) -> anyhow::Result<()> {
    let mut store = open_default_keystore()?;

    // ask for password with confirmation
    let password = prompt::password_repeated("seed password")?;

    let entropy = generate_entropy(args.size).context("failed to generate entropy")?;
    let mnemonic = entropy_to_mnemonic(&entropy).context("failed to encode mnemonic")?;
    println!("Mnemonic: {}", mnemonic);

    if !prompt::confirm("Do you want to save the seed?")? {
        return Ok(());
    }

    // Flag form wins over the positional name; either way the name must be
    // unused in the keystore
    let mut name = args.name_flag.or(args.name).unwrap_or_default();
    if !name.is_empty() && store.has(&name) {
        println!("Seed {:?} already exists.", name);
        name.clear();
    }
    if name.is_empty() {
        name = prompt::unique_seed_name(&store)?;
    }

    store.create(&name, &mnemonic, &password)?;
    println!("Seed {:?} saved.", name);
    Ok(())
}

fn handle_list() -> anyhow::Result<()> {
    let store = open_default_keystore()?;
    let names: Vec<&str> = store.names().collect();
    if names.is_empty() {
        println!("No seeds stored.");
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
