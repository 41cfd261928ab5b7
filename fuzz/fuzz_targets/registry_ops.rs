#![no_main]

extern crate arbitrary;
extern crate draw_odds;
extern crate libfuzzer_sys;

use draw_odds::config::DeckConfig;
use draw_odds::engine::Calculator;
use draw_odds::registry::{listener::RecordingListener, GroupKey, GroupRegistry, RegistryEvent};

use libfuzzer_sys::fuzz_target;

/// Keep the numbers small so the enumeration stays cheap.
const LIMIT: i16 = 64;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
enum Op {
    DeckSize(i16),
    SampleSize(i16),
    AddGroup(i16, i16, i16),
    RemoveGroup(u8),
    GroupSize(u8, i16),
    GroupMin(u8, i16),
    GroupMax(u8, i16),
}

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub ops: Vec<Op>,
}

fn assert_invariants(registry: &GroupRegistry) {
    assert!(registry.sample_size() <= registry.deck_size());
    assert_eq!(
        registry.deck_size(),
        registry.assigned_cards() + registry.unassigned_cards()
    );
    for (_, group) in registry.groups() {
        assert!(group.min_in_sample() <= group.max_in_sample());
        assert!(group.max_in_sample() <= group.card_count());
    }
}

fuzz_target!(|input: Input| {
    let listener = RecordingListener::new();
    let storage = listener.get_storage();
    let mut registry = GroupRegistry::new().with_listener(listener);

    for op in input.ops {
        let before = DeckConfig::from(&registry);
        let result = match op {
            Op::DeckSize(n) => registry.set_deck_size(n % LIMIT),
            Op::SampleSize(n) => registry.set_sample_size(n % LIMIT),
            Op::AddGroup(c, l, h) => registry
                .add_group(c % LIMIT, l % LIMIT, h % LIMIT)
                .map(|_| ()),
            Op::RemoveGroup(k) => {
                registry.remove_group(GroupKey::new(k.into()));
                Ok(())
            }
            Op::GroupSize(k, n) => registry.set_group_size(GroupKey::new(k.into()), n % LIMIT),
            Op::GroupMin(k, n) => registry.set_group_min(GroupKey::new(k.into()), n % LIMIT),
            Op::GroupMax(k, n) => registry.set_group_max(GroupKey::new(k.into()), n % LIMIT),
        };

        if let Err(err) = result {
            // Refused edits leave nothing behind but the event.
            assert_eq!(before, DeckConfig::from(&registry));
            assert_eq!(
                Some(&RegistryEvent::Rejected(err)),
                storage.borrow().last()
            );
        }
        assert_invariants(&registry);
    }

    if registry.len() <= 3 {
        let calc = Calculator::new(&registry).calculate().unwrap();
        let p = calc.probability();
        assert!((0.0..=1.0).contains(&p));
        assert_eq!(p, registry.calculate().unwrap());
    }
});
