//! Packed `attr=value` maps: attribute mask in the high 16 bits of an
//! entry, the value's positioned ordinal in the low 16. OR-ing the low
//! halves of a concrete state's entries yields its stateval.

use hashbrown::HashMap;

use crate::types::{Statemaskval, Stateval};

#[derive(Clone, Debug, Default)]
pub struct StateMap {
    entries: HashMap<String, Statemaskval>,
}

#[inline]
fn bits_for(values: usize) -> u32 {
    if values <= 1 {
        0
    } else {
        usize::BITS - (values - 1).leading_zeros()
    }
}

impl StateMap {
    /// Builds the packed layout from an ordered attribute list shaped
    /// `[[name, v1, v2, ..], ..]`. Each attribute gets ⌈log₂ n⌉
    /// consecutive bits; more than 16 bits total is invalid.
    pub fn build(states: &[Vec<String>]) -> Result<StateMap, String> {
        let mut entries = HashMap::new();
        let mut offset = 0u32;
        for attr in states {
            let Some((name, values)) = attr.split_first() else {
                continue;
            };
            let bits = bits_for(values.len());
            if offset + bits > 16 {
                return Err(format!(
                    "state attributes need {} bits at {name}, 16 available",
                    offset + bits
                ));
            }
            let mask = (((1u32 << bits) - 1) << offset) << 16;
            for (i, v) in values.iter().enumerate() {
                entries.insert(format!("{name}={v}"), mask | ((i as u32) << offset));
            }
            offset += bits;
        }
        Ok(StateMap { entries })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a full comma-joined property string, e.g.
    /// `half=top,open=true`. Unknown pairs contribute nothing.
    pub fn get(&self, properties: &str) -> Stateval {
        self.get_list(properties.split(','))
    }

    pub fn get_list<I, S>(&self, props: I) -> Stateval
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state: Stateval = 0;
        for p in props {
            if let Some(&v) = self.entries.get(p.as_ref()) {
                state |= v as Stateval;
            }
        }
        state
    }

    /// OR of every value; an upper bound on any achievable stateval,
    /// which bounds the per-block template array length.
    pub fn max(&self) -> Stateval {
        let mut state: Stateval = 0;
        for &v in self.entries.values() {
            state |= v as Stateval;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(list: &[&[&str]]) -> Vec<Vec<String>> {
        list.iter()
            .map(|a| a.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn packs_attributes_consecutively() {
        let sm = StateMap::build(&attrs(&[
            &["half", "bottom", "top"],
            &["open", "false", "true"],
            &["facing", "east", "north", "south", "west"],
        ]))
        .unwrap();
        assert_eq!(sm.get("half=bottom"), 0);
        assert_eq!(sm.get("half=top"), 1);
        assert_eq!(sm.get("open=true"), 0b10);
        assert_eq!(sm.get("facing=west"), 0b1100);
        assert_eq!(sm.get("half=top,open=true,facing=south"), 0b1011);
        assert_eq!(sm.max(), 0b1111);
    }

    #[test]
    fn unknown_pairs_contribute_nothing() {
        let sm = StateMap::build(&attrs(&[&["lit", "false", "true"]])).unwrap();
        assert_eq!(sm.get("lit=true,waterlogged=true"), 1);
        assert_eq!(sm.get(""), 0);
    }

    #[test]
    fn single_value_attribute_takes_no_bits() {
        let sm = StateMap::build(&attrs(&[
            &["shape", "straight"],
            &["half", "bottom", "top"],
        ]))
        .unwrap();
        assert_eq!(sm.get("shape=straight"), 0);
        assert_eq!(sm.get("half=top"), 1);
        assert_eq!(sm.max(), 1);
    }

    #[test]
    fn overflowing_sixteen_bits_is_an_error() {
        let many: Vec<String> = (0..17)
            .map(|i| {
                if i == 0 {
                    "age".to_string()
                } else {
                    format!("v{i}")
                }
            })
            .collect();
        // five attributes of 16 values each need 20 bits
        let states = vec![many.clone(), many.clone(), many.clone(), many.clone(), many];
        assert!(StateMap::build(&states).is_err());
    }
}
