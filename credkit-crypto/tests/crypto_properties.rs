//! Property-based tests for digests.
//!
//! These verify the properties stored credentials rely on:
//! - Digests are deterministic
//! - Different salts give different digests for the same plaintext
//! - Different plaintexts give different digests under the same salt
//! - Empty plaintext always digests to ""

use credkit_crypto::{DigestAlgorithm, SaltStrategy};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn salt_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9a-f]{32}").unwrap()
}

fn password_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9!@#$%^&*() ]{1,64}").unwrap()
}

fn algorithm_strategy() -> impl Strategy<Value = DigestAlgorithm> {
    prop_oneof![
        Just(DigestAlgorithm::HmacSha1),
        Just(DigestAlgorithm::HmacSha256),
    ]
}

// =============================================================================
// DIGEST PROPERTIES
// =============================================================================

mod digest_properties {
    use super::*;

    proptest! {
        /// Identical inputs always yield identical digests
        #[test]
        fn digest_is_deterministic(
            algorithm in algorithm_strategy(),
            password in password_strategy(),
            salt in salt_strategy(),
        ) {
            let a = algorithm.digest(Some(&password), &salt).unwrap();
            let b = algorithm.digest(Some(&password), &salt).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Same plaintext under different salts yields different digests
        #[test]
        fn different_salts_give_different_digests(
            algorithm in algorithm_strategy(),
            password in password_strategy(),
            salt1 in salt_strategy(),
            salt2 in salt_strategy(),
        ) {
            prop_assume!(salt1 != salt2);
            let a = algorithm.digest(Some(&password), &salt1).unwrap();
            let b = algorithm.digest(Some(&password), &salt2).unwrap();
            prop_assert_ne!(a, b);
        }

        /// Different plaintexts under one salt yield different digests
        #[test]
        fn different_passwords_give_different_digests(
            algorithm in algorithm_strategy(),
            p1 in password_strategy(),
            p2 in password_strategy(),
            salt in salt_strategy(),
        ) {
            prop_assume!(p1 != p2);
            let a = algorithm.digest(Some(&p1), &salt).unwrap();
            let b = algorithm.digest(Some(&p2), &salt).unwrap();
            prop_assert_ne!(a, b);
        }

        /// Empty plaintext short-circuits for any salt
        #[test]
        fn empty_plaintext_is_always_empty(
            algorithm in algorithm_strategy(),
            salt in ".*",
        ) {
            prop_assert_eq!(algorithm.digest(Some(""), &salt).unwrap(), "");
            prop_assert_eq!(algorithm.digest(None, &salt).unwrap(), "");
        }

        /// A digest is never the plaintext it was derived from
        #[test]
        fn digest_differs_from_plaintext(
            algorithm in algorithm_strategy(),
            password in password_strategy(),
            salt in salt_strategy(),
        ) {
            let digest = algorithm.digest(Some(&password), &salt).unwrap();
            prop_assert_ne!(digest, password);
        }
    }
}

// =============================================================================
// SALT PROPERTIES
// =============================================================================

mod salt_properties {
    use super::*;

    proptest! {
        /// Generated salts are never empty, whatever the strategy
        #[test]
        fn salts_are_non_empty(strategy in prop_oneof![
            Just(SaltStrategy::TimeRandom),
            Just(SaltStrategy::OsRandom),
        ]) {
            prop_assert!(!strategy.make_salt().is_empty());
        }
    }
}
