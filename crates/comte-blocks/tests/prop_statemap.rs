use comte_blocks::StateMap;
use proptest::prelude::*;

fn attr_list(max_attrs: usize) -> impl Strategy<Value = Vec<Vec<String>>> {
    // attribute cardinalities up to 5; names a0, a1, .. with values v0..vn
    prop::collection::vec(2usize..=5, 1..=max_attrs).prop_map(|cards| {
        cards
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let mut attr = vec![format!("a{i}")];
                attr.extend((0..n).map(|v| format!("v{v}")));
                attr
            })
            .collect()
    })
}

/// Every concrete attribute combination packs to a distinct stateval
/// within [0, max], and parsing the generated property string returns
/// the same value.
#[test]
fn pack_roundtrip_is_injective_and_bounded() {
    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(&attr_list(4), |attrs| {
            let sm = StateMap::build(&attrs).unwrap();
            let max = sm.max();
            let cards: Vec<usize> = attrs.iter().map(|a| a.len() - 1).collect();
            let total: usize = cards.iter().product();
            let mut seen = vec![false; max as usize + 1];
            for mut combo in 0..total {
                let mut props = Vec::new();
                for (i, &n) in cards.iter().enumerate() {
                    let pick = combo % n;
                    combo /= n;
                    props.push(format!("a{i}=v{pick}"));
                }
                let s = sm.get_list(&props);
                prop_assert!(s <= max, "stateval {s} above max {max}");
                prop_assert!(!seen[s as usize], "stateval {s} not unique");
                seen[s as usize] = true;
                prop_assert_eq!(sm.get(&props.join(",")), s);
            }
            Ok(())
        })
        .unwrap();
}

/// With power-of-two cardinalities every stateval in [0, max] is
/// achievable, so template arrays indexed by stateval have no holes.
#[test]
fn pow2_cardinalities_cover_the_full_range() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let strat = prop::collection::vec(prop_oneof![Just(2usize), Just(4usize)], 1..=4);
    runner
        .run(&strat, |cards| {
            let attrs: Vec<Vec<String>> = cards
                .iter()
                .enumerate()
                .map(|(i, &n)| {
                    let mut attr = vec![format!("a{i}")];
                    attr.extend((0..n).map(|v| format!("v{v}")));
                    attr
                })
                .collect();
            let sm = StateMap::build(&attrs).unwrap();
            let max = sm.max();
            let total: usize = cards.iter().product();
            prop_assert_eq!(total, max as usize + 1);
            let mut seen = vec![false; total];
            for mut combo in 0..total {
                let mut props = Vec::new();
                for (i, &n) in cards.iter().enumerate() {
                    props.push(format!("a{i}=v{}", combo % n));
                    combo /= n;
                }
                seen[sm.get_list(&props) as usize] = true;
            }
            prop_assert!(seen.into_iter().all(|b| b));
            Ok(())
        })
        .unwrap();
}
