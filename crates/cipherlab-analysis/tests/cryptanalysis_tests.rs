//! End-to-end cryptanalysis round trips: encrypt with a known key,
//! recover it from the ciphertext alone.

use cipherlab_analysis::{ic_estimate, kasiski_estimate, recover_key};
use cipherlab_cipher::VigenereKey;
use cipherlab_types::config::{IcConfig, KasiskiConfig};
use cipherlab_types::{CleanedText, LanguageProfile};

/// Ordinary English prose, long enough that every key column of a
/// five-letter key sees well over a hundred letters.
const PLAINTEXT: &str = "The river mist rose slowly over the old stone bridge while the \
first carts rattled toward the market square. Traders called out their prices, stacking \
crates of apples, barrels of salted fish, and bolts of heavy woolen cloth against the \
morning cold. A gray cat watched from the baker's window, tail curled around its feet, \
as the ovens filled the narrow street with the smell of warm bread. By noon the square \
was loud with bargaining voices, and the clerk at the counting house bent over his \
ledger, recording every sale in small careful letters. When the light finally failed, \
the lamplighter walked his slow round, touching flame to wick, and the stalls emptied \
one by one until only the river and the wind kept moving through the town. The watchman \
locked the gates at the ninth bell, nodded to the ferryman waiting below the wall, and \
climbed the tower stairs to watch the barges drift past on the dark water. Far upstream \
a heron stood motionless among the reeds, patient as the stones, while the current \
carried leaves and lantern light toward the distant sea.";

fn encrypt_cleaned(key: &str) -> CleanedText {
    let key = VigenereKey::new(key).expect("valid test key");
    let plain = CleanedText::clean(PLAINTEXT);
    CleanedText::clean(&key.encrypt(plain.as_str()))
}

#[test]
fn sample_is_long_enough_for_recovery() {
    let plain = CleanedText::clean(PLAINTEXT);
    assert!(plain.len() >= 800, "sample has only {} letters", plain.len());
}

#[test]
fn recovery_reproduces_the_key() {
    let cipher = encrypt_cleaned("CODES");
    let recovered =
        recover_key(&cipher, 5, &LanguageProfile::english()).expect("recovery runs");
    assert_eq!(recovered.key, "CODES");
    assert_eq!(recovered.reduced_from, None);
    assert!(recovered.columns.iter().all(|c| !c.degenerate));
}

#[test]
fn recovery_survives_formatted_ciphertext() {
    // The transform leaves punctuation in place and advances its key
    // only on letters; cleaning the formatted ciphertext must land every
    // letter back in the column it was encrypted under.
    let key = VigenereKey::new("CODES").expect("valid test key");
    let formatted_cipher = key.encrypt(PLAINTEXT);
    let cipher = CleanedText::clean(&formatted_cipher);

    let recovered =
        recover_key(&cipher, 5, &LanguageProfile::english()).expect("recovery runs");
    assert_eq!(recovered.key, "CODES");
}

#[test]
fn periodic_key_collapses_to_minimal_period() {
    let cipher = encrypt_cleaned("NANA");
    let recovered =
        recover_key(&cipher, 4, &LanguageProfile::english()).expect("recovery runs");
    assert_eq!(recovered.key, "NA");
    assert_eq!(recovered.reduced_from, Some(4));
    assert_eq!(recovered.columns.len(), 4);
}

#[test]
fn recovered_key_decrypts_the_ciphertext() {
    let cipher = encrypt_cleaned("CODES");
    let recovered =
        recover_key(&cipher, 5, &LanguageProfile::english()).expect("recovery runs");

    let key = VigenereKey::new(&recovered.key).expect("recovered key is well formed");
    let plain = CleanedText::clean(PLAINTEXT);
    assert_eq!(key.decrypt(cipher.as_str()), plain.as_str());
}

#[test]
fn ic_estimate_points_at_the_key_period() {
    let cipher = encrypt_cleaned("CODES");
    let report = ic_estimate(&cipher, &IcConfig { max_candidate: 10 }, &LanguageProfile::english())
        .expect("estimator runs");

    let best = report.best().expect("scores are non-empty");
    // Multiples of the true period also produce monoalphabetic columns,
    // so 5 and 10 are both acceptable winners here.
    assert_eq!(best.length % 5, 0, "ic chose length {}", best.length);
    assert!(best.distance < 0.015, "distance was {}", best.distance);
}

#[test]
fn estimators_are_idempotent_on_real_ciphertext() {
    let cipher = encrypt_cleaned("CODES");
    let profile = LanguageProfile::english();
    let kasiski_cfg = KasiskiConfig::default();
    let ic_cfg = IcConfig::default();

    let k1 = kasiski_estimate(&cipher, &kasiski_cfg).expect("kasiski runs");
    let k2 = kasiski_estimate(&cipher, &kasiski_cfg).expect("kasiski runs");
    assert_eq!(k1, k2);

    let i1 = ic_estimate(&cipher, &ic_cfg, &profile).expect("ic runs");
    let i2 = ic_estimate(&cipher, &ic_cfg, &profile).expect("ic runs");
    assert_eq!(i1, i2);

    let r1 = recover_key(&cipher, 5, &profile).expect("recovery runs");
    let r2 = recover_key(&cipher, 5, &profile).expect("recovery runs");
    assert_eq!(r1, r2);
}

#[test]
fn kasiski_ranks_the_period_of_synthetic_repetition() {
    // A plaintext that repeats with the key period produces ciphertext
    // that repeats with the same period, giving Kasiski unambiguous
    // n-gram groups to vote with.
    let key = VigenereKey::new("CODES").expect("valid test key");
    let plain = "WATERMILL".repeat(60); // period lcm(9, 5) = 45 in cipher
    let cipher = CleanedText::clean(&key.encrypt(&plain));

    let config = KasiskiConfig {
        ngram_len: 3,
        min_distance: 40,
        max_candidate: 50,
    };
    let report = kasiski_estimate(&cipher, &config).expect("kasiski runs");
    let best = report.best().expect("synthetic repetition must vote");
    assert_eq!(best % 5, 0, "kasiski chose {best}");
    assert_eq!(best, 45);
}
