use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DbConfig {
    #[serde(default)]
    pub pg_con: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_exec_migrations")]
    pub exec_migrations: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            pg_con: String::new(),
            pool_size: default_pool_size(),
            exec_migrations: default_exec_migrations(),
        }
    }
}

fn default_pool_size() -> u32 {
    20
}

fn default_exec_migrations() -> bool {
    true
}
