//! Integration tests for provider resolution, the global registry and
//! parameter handling through the public surface.

use std::sync::Arc;

use crypto_facade::algorithms::aead::{self, AeadParameters, SymmetricKeyParameters};
use crypto_facade::algorithms::digest::{self, Digest, SHA256, SHA512};
use crypto_facade::algorithms::hmac::{HmacParameters, HMAC};
use crypto_facade::engines::software;
use crypto_facade::{provider, AlgorithmId, Error, Parameters, Provider};

const WHIRLPOOL: AlgorithmId<dyn Digest> = AlgorithmId::new("Whirlpool");

#[test]
fn test_resolved_algorithm_matches_requested_identifier() {
    let provider = software::provider();
    assert_eq!(provider.get(SHA256).unwrap().id(), SHA256);
    assert_eq!(provider.get(SHA512).unwrap().id(), SHA512);
}

#[test]
fn test_unregistered_identifier_fails_with_unsupported_algorithm() {
    let provider = software::provider();
    let err = match provider.get(WHIRLPOOL) {
        Ok(_) => panic!("expected resolution to fail"),
        Err(err) => err,
    };
    match err {
        Error::UnsupportedAlgorithm { algorithm, provider } => {
            assert_eq!(algorithm, "Whirlpool");
            assert_eq!(provider, software::ENGINE_NAME);
        }
        other => panic!("expected UnsupportedAlgorithm, got {other:?}"),
    }
}

#[test]
fn test_composite_provider_prefers_earlier_delegates() {
    let software = software::provider();
    let sha256 = software.get(SHA256).unwrap();
    let preferred = Provider::builder("preferred").register(SHA256, sha256.clone()).build();

    let composite = Provider::composite("composite", vec![preferred, software.clone()]);
    assert!(Arc::ptr_eq(&composite.get(SHA256).unwrap(), &sha256));
    // Algorithms only the second delegate has still resolve.
    assert!(composite.supports(HMAC));
}

#[test]
fn test_global_registry_installation() {
    software::install();
    software::install();

    let default = provider::default_provider().unwrap();
    assert_eq!(default.name(), software::ENGINE_NAME);
    assert!(provider::provider_by_name(software::ENGINE_NAME).is_some());
    assert!(provider::provider_by_name("missing").is_none());
    assert_eq!(
        provider::installed_providers()
            .iter()
            .filter(|p| p.name() == software::ENGINE_NAME)
            .count(),
        1
    );
}

#[test]
fn test_parameter_defaults_and_overrides() {
    let defaults = HmacParameters::default();
    assert_eq!(defaults.digest, SHA256);
    assert_eq!(defaults.configure(|_| {}), defaults);

    let sha512 = defaults.configure(|b| b.digest = SHA512);
    assert_eq!(sha512.digest, SHA512);
    // The base value is untouched and later configures stay isolated.
    assert_eq!(defaults.digest, SHA256);
    assert_eq!(sha512.configure(|_| {}), sha512);

    let tag = crypto_facade::configure::<AeadParameters, _>(|_| {});
    assert_eq!(tag, AeadParameters::default());
    assert_eq!(tag.tag_size_bits, 128);

    let key = crypto_facade::configure::<SymmetricKeyParameters, _>(|b| b.size_bits = 128);
    assert_eq!(key.size_bits, 128);
}

#[test]
fn test_hmac_rejects_unknown_digest() {
    let provider = software::provider();
    let hmac = provider.get(HMAC).unwrap();

    let parameters = HmacParameters::default().configure(|b| b.digest = WHIRLPOOL);
    let err = match hmac.key_generator(parameters) {
        Ok(_) => panic!("expected parameter validation to fail"),
        Err(err) => err,
    };
    match err {
        Error::UnsupportedParameterValue { engine, reason, .. } => {
            assert_eq!(engine, software::ENGINE_NAME);
            assert!(reason.contains("Whirlpool"));
        }
        other => panic!("expected UnsupportedParameterValue, got {other:?}"),
    }
}

#[test]
fn test_aead_rejects_unsupported_sizes() {
    let provider = software::provider();
    let algorithm = provider.get(aead::CHACHA20_POLY1305).unwrap();

    let err = match algorithm.key_generator(SymmetricKeyParameters { size_bits: 128 }) {
        Ok(_) => panic!("expected parameter validation to fail"),
        Err(err) => err,
    };
    assert!(matches!(err, Error::UnsupportedParameterValue { .. }));

    let key = algorithm
        .key_generator(SymmetricKeyParameters::default())
        .unwrap()
        .generate_blocking()
        .unwrap();
    let err = match key.cipher(AeadParameters { tag_size_bits: 96 }) {
        Ok(_) => panic!("expected parameter validation to fail"),
        Err(err) => err,
    };
    assert!(matches!(err, Error::UnsupportedParameterValue { .. }));
}

#[test]
fn test_digest_ids_are_value_equal_singletons() {
    assert_eq!(SHA256, digest::SHA256);
    assert_ne!(SHA256, SHA512);
    assert_eq!(SHA256.name(), "SHA-256");
    assert_eq!(format!("{SHA512}"), "SHA-512");
}
