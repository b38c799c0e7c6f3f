//! A simple example showing the use of a Bloom filter, and restoring it from
//! its exported bits.
use bloomset::{BitVec, BloomFilter};

fn main() -> Result<(), bloomset::Error> {
    let mut bf = BloomFilter::with_size(1024, 128)?;

    bf.add(&"foo");
    bf.add(&"bar");

    bf.contains(&"foo"); // true
    bf.contains(&"bar"); // true
    bf.contains(&"baz"); // false

    bf.count(); // 2
    bf.estimated_false_positive_probability(); // close to zero

    // Persist the raw bytes, then bring the filter back.
    let bytes: Vec<u8> = bf.as_bytes().to_vec();
    let restored = BloomFilter::from_existing(1024, 128, bf.count(), &BitVec::from(bytes))?;

    assert_eq!(bf, restored);
    assert!(restored.contains(&"foo"));

    Ok(())
}
