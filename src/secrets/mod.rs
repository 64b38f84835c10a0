mod env_store;

pub use env_store::{
    load_credentials, load_dotenv, token_env_key, CredentialSource, EnvSource,
    DEFAULT_TOKEN_PREFIX,
};
