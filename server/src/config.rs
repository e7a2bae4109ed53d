use clap::Parser;

pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://cryptolaboratory.vercel.app";
pub const DEFAULT_RSA_BITS: usize = 2048;

/// CryptoLab HTTP server.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Address to listen on
    #[arg(long, env = "CRYPTOLAB_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// SQLite file for result history; history is disabled when absent
    #[arg(long, env = "CRYPTOLAB_DATABASE")]
    pub database: Option<String>,

    /// Comma separated list of allowed front-end origins
    #[arg(long, env = "CRYPTOLAB_CORS_ORIGINS", default_value = DEFAULT_CORS_ORIGINS)]
    pub cors_origins: String,

    /// bcrypt work factor
    #[arg(long, env = "CRYPTOLAB_BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,

    /// RSA modulus size for generated key pairs
    #[arg(long, env = "CRYPTOLAB_RSA_BITS", default_value_t = DEFAULT_RSA_BITS)]
    pub rsa_bits: usize,
}

impl Settings {
    pub fn origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn tools(&self) -> ToolSettings {
        ToolSettings {
            bcrypt_cost: self.bcrypt_cost,
            rsa_bits: self.rsa_bits,
        }
    }
}

/// Tunables of the library-backed tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSettings {
    pub bcrypt_cost: u32,
    pub rsa_bits: usize,
}

impl Default for ToolSettings {
    fn default() -> Self {
        ToolSettings {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            rsa_bits: DEFAULT_RSA_BITS,
        }
    }
}
