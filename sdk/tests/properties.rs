//! Property tests for batching, the enum codec and address derivation.

use proptest::prelude::*;
use solana_sdk::pubkey::Pubkey;
use zeta_sdk::instructions::{derive_program_address, split, ProgramAddress};
use zeta_sdk::{MovementType, OrderType, Side, TreasuryMovementType, TriggerDirection};

fn pubkey_strategy() -> impl Strategy<Value = Pubkey> {
    any::<[u8; 32]>().prop_map(Pubkey::new_from_array)
}

fn seeds_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=32), 0..4)
}

proptest! {
    #[test]
    fn split_preserves_items_and_order(
        items in prop::collection::vec(any::<u32>(), 0..200),
        limit in 1usize..30,
    ) {
        let chunks = split(&items, limit).expect("positive limit");

        prop_assert_eq!(chunks.len(), items.len().div_ceil(limit));
        prop_assert_eq!(chunks.concat(), items);
        if let Some((_, full)) = chunks.split_last() {
            prop_assert!(full.iter().all(|chunk| chunk.len() == limit));
        }
        prop_assert!(chunks.iter().all(|chunk| !chunk.is_empty() && chunk.len() <= limit));
    }
}

proptest! {
    #[test]
    fn side_round_trips(side in prop::sample::select(vec![Side::Bid, Side::Ask])) {
        prop_assert_eq!(Side::try_from(u8::from(side)), Ok(side));
        prop_assert_eq!(borsh::to_vec(&side).expect("encode"), vec![u8::from(side)]);
    }

    #[test]
    fn order_type_round_trips(order_type in prop::sample::select(vec![
        OrderType::Limit,
        OrderType::PostOnly,
        OrderType::FillOrKill,
        OrderType::ImmediateOrCancel,
        OrderType::PostOnlySlide,
    ])) {
        prop_assert_eq!(OrderType::try_from(u8::from(order_type)), Ok(order_type));
    }

    #[test]
    fn trigger_direction_round_trips(direction in prop::sample::select(vec![
        TriggerDirection::Uninitialized,
        TriggerDirection::LessThanOrEqual,
        TriggerDirection::GreaterThanOrEqual,
    ])) {
        prop_assert_eq!(TriggerDirection::try_from(u8::from(direction)), Ok(direction));
    }

    #[test]
    fn movement_type_round_trips(
        movement in prop::sample::select(vec![MovementType::Lock, MovementType::Unlock])
    ) {
        prop_assert_eq!(MovementType::try_from(u8::from(movement)), Ok(movement));
    }

    #[test]
    fn treasury_movement_type_round_trips(movement in prop::sample::select(vec![
        TreasuryMovementType::ToTreasuryFromInsurance,
        TreasuryMovementType::ToInsuranceFromTreasury,
        TreasuryMovementType::ToTreasuryFromReferralsRewards,
        TreasuryMovementType::ToReferralsRewardsFromTreasury,
    ])) {
        prop_assert_eq!(TreasuryMovementType::try_from(u8::from(movement)), Ok(movement));
    }
}

proptest! {
    #[test]
    fn derivation_is_deterministic(seeds in seeds_strategy(), program_id in pubkey_strategy()) {
        let refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        let first = derive_program_address(&refs, &program_id).expect("valid seeds");
        let second = derive_program_address(&refs, &program_id).expect("valid seeds");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn margin_account_matches_raw_seeds(
        zeta_group in pubkey_strategy(),
        owner in pubkey_strategy(),
        program_id in pubkey_strategy(),
    ) {
        let address = ProgramAddress::MarginAccount { zeta_group, owner };
        let seeds = address.seeds();
        let refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        prop_assert_eq!(
            address.derive(&program_id).expect("derive"),
            derive_program_address(&refs, &program_id).expect("derive")
        );
        prop_assert_eq!(refs[1], zeta_group.as_ref());
        prop_assert_eq!(refs[2], owner.as_ref());
    }

    #[test]
    fn oversized_seed_is_rejected(len in 33usize..64, program_id in pubkey_strategy()) {
        let seed = vec![7u8; len];
        prop_assert!(derive_program_address(&[seed.as_slice()], &program_id).is_err());
    }
}
