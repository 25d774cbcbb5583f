//! Schemas shared by the unit tests.

use serde::{Deserialize, Serialize};

use crate::{FromEnv, Merge, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
pub struct CustomConfig {
    #[config(env_prefix = "BASE_")]
    pub base: Base,
    pub foo: Foo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
pub struct Base {
    #[config(required, env = "A")]
    pub a: i64,
    #[config(required, env = "B")]
    pub b: String,
    #[config(env = "C")]
    pub c: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
pub struct Foo {
    #[config(required, env = "BAR")]
    pub bar: String,
}
