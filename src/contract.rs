//! Response contract for a Pokemon description.
//!
//! Field names follow the Kaggle "The Complete Pokemon Dataset" columns.
//! Every field is a string in the schema sent to the model, numeric stats
//! included.

use log::{debug, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "PokemonOpenAIContract")]
pub struct PokemonContract
{   pub name: String
  , pub japanese_name: String
  , pub pokedex_number: String
  , pub percentage_male: String
  , pub type1: String
  , pub type2: String
  , pub classification: String
  , pub height_m: String
  , pub weight_kg: String
  , pub capture_rate: String
  , pub base_egg_steps: String
  , pub abilities: String
  , pub experience_growth: String
  , pub base_happiness: String
  , pub against_: String
  , pub hp: String
  , pub attack: String
  , pub defense: String
  , pub sp_attack: String
  , pub sp_defense: String
  , pub speed: String
  , pub generation: String
  , pub is_legendary: String
}

impl PokemonContract
{   /// Declared field names, in declaration order
    pub const FIELD_NAMES: [&'static str; 23] = [
      "name"
    , "japanese_name"
    , "pokedex_number"
    , "percentage_male"
    , "type1"
    , "type2"
    , "classification"
    , "height_m"
    , "weight_kg"
    , "capture_rate"
    , "base_egg_steps"
    , "abilities"
    , "experience_growth"
    , "base_happiness"
    , "against_"
    , "hp"
    , "attack"
    , "defense"
    , "sp_attack"
    , "sp_defense"
    , "speed"
    , "generation"
    , "is_legendary"
    ];

    /// JSON schema used as the function parameters.
    /// The `$schema` meta key is dropped; the API does not need it.
    pub fn json_schema() -> Value
    {   let mut schema = Value::from(schemars::schema_for!(PokemonContract));
        if let Some(object) = schema.as_object_mut()
        {   object.remove("$schema");
        }
        schema
    }

    /// Check `value` against the contract and convert it.
    ///
    /// Every declared field must be present and hold a string. Unknown
    /// keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, Error>
    {   let object = value.as_object()
          .ok_or(Error::NotAnObject)?;

        let mut missing = Vec::new();
        let mut not_strings = Vec::new();
        for field in Self::FIELD_NAMES
        {   match object.get(field)
            {   None => missing.push(field)
              , Some(Value::String(_)) => {}
              , Some(_) => not_strings.push(field)
            }
        }

        if !missing.is_empty() || !not_strings.is_empty()
        {   warn!(
              "Contract mismatch: missing={:?}, not_strings={:?}",
              missing, not_strings
            );
            return Err(Error::SchemaMismatch(format!(
              "missing fields {:?}, non-string fields {:?}",
              missing, not_strings
            )));
        }

        debug!("Payload satisfies PokemonContract");
        serde_json::from_value(value.clone())
          .map_err(|e| Error::SchemaMismatch(e.to_string()))
    }
}
