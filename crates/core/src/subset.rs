//! Subset, merge and encode the input fonts.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::{
    codepoints::Codepoint,
    engine::FontEngine,
    error::{Error, Result},
    flavor::Flavor,
};

/// One output font file actually written, as consumed by the stylesheet
/// generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontOutput {
    /// File name only, no directory.
    pub file_name: String,
    pub flavor: Flavor,
}

/// Subset every input font to the mapping's codepoints, merge the results,
/// and persist the merged font once per requested flavor at
/// `{output_base}.{suffix}`.
///
/// Each input font is subset independently (in parallel); the merge joins
/// them in input order, so the earliest input wins duplicate codepoints. All
/// flavors are encoded in memory before the first file is written: a failure
/// anywhere leaves no output files behind.
///
/// Returns the written outputs in requested flavor order.
pub fn generate_subset_font(
    engine: &impl FontEngine,
    input_fonts: &[PathBuf],
    codepoints: &IndexMap<String, Codepoint>,
    output_base: &Path,
    flavors: &[Flavor],
) -> Result<Vec<FontOutput>> {
    let filter: BTreeSet<u32> = codepoints.values().map(Codepoint::scalar).collect();
    log::info!(
        "subsetting {} fonts to {} codepoints",
        input_fonts.len(),
        filter.len()
    );

    let inputs = input_fonts
        .iter()
        .map(|path| {
            fs::read(path).map_err(|source| Error::InputFont { path: path.clone(), source })
        })
        .collect::<Result<Vec<_>>>()?;

    let subsets = inputs
        .par_iter()
        .map(|font| engine.subset(font, &filter))
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| Error::Subset(e.into()))?;

    let merged = engine.merge(&subsets).map_err(|e| Error::Subset(e.into()))?;

    // Encode everything before writing anything
    let mut encoded = Vec::with_capacity(flavors.len());
    for &flavor in flavors {
        let bytes = engine.encode(&merged, flavor).map_err(|e| Error::Subset(e.into()))?;
        encoded.push((output_base.with_extension(flavor.suffix()), bytes, flavor));
    }

    let mut outputs = Vec::with_capacity(encoded.len());
    for (path, bytes, flavor) in encoded {
        fs::write(&path, &bytes).map_err(|source| Error::Io { path: path.clone(), source })?;
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.display().to_string(),
        };
        log::debug!("wrote {file_name} ({} bytes)", bytes.len());
        outputs.push(FontOutput { file_name, flavor });
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::bail;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Subset(BTreeSet<u32>),
        Merge(usize),
        Encode(Flavor),
    }

    #[derive(Default)]
    struct FakeEngine {
        calls: Mutex<Vec<Call>>,
        fail_encode: bool,
    }

    impl FontEngine for FakeEngine {
        fn subset(&self, font: &[u8], codepoints: &BTreeSet<u32>) -> anyhow::Result<Vec<u8>> {
            self.calls.lock().unwrap().push(Call::Subset(codepoints.clone()));
            Ok(font.to_vec())
        }

        fn merge(&self, fonts: &[Vec<u8>]) -> anyhow::Result<Vec<u8>> {
            self.calls.lock().unwrap().push(Call::Merge(fonts.len()));
            Ok(fonts.concat())
        }

        fn encode(&self, font: &[u8], flavor: Flavor) -> anyhow::Result<Vec<u8>> {
            self.calls.lock().unwrap().push(Call::Encode(flavor));
            if self.fail_encode {
                bail!("encode failed");
            }
            let mut out = font.to_vec();
            out.extend_from_slice(flavor.suffix().as_bytes());
            Ok(out)
        }
    }

    fn mapping(pairs: &[(&str, &str)]) -> IndexMap<String, Codepoint> {
        pairs
            .iter()
            .map(|(name, hex)| (name.to_string(), Codepoint::from_hex(hex).unwrap()))
            .collect()
    }

    fn write_fake_fonts(dir: &Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("font{i}.ttf"));
                fs::write(&path, format!("font{i}")).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn writes_one_file_per_flavor_in_request_order() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = write_fake_fonts(tmp.path(), 2);
        let engine = FakeEngine::default();
        let base = tmp.path().join("out").join("subset");
        fs::create_dir_all(base.parent().unwrap()).unwrap();

        let outputs = generate_subset_font(
            &engine,
            &inputs,
            &mapping(&[("user", "f007"), ("github", "f09b")]),
            &base,
            &[Flavor::Ttf, Flavor::Woff, Flavor::Woff2],
        )
        .unwrap();

        assert_eq!(
            outputs,
            [
                FontOutput { file_name: "subset.ttf".into(), flavor: Flavor::Ttf },
                FontOutput { file_name: "subset.woff".into(), flavor: Flavor::Woff },
                FontOutput { file_name: "subset.woff2".into(), flavor: Flavor::Woff2 },
            ]
        );
        for output in &outputs {
            let written = fs::read(base.parent().unwrap().join(&output.file_name)).unwrap();
            assert!(!written.is_empty());
        }
    }

    #[test]
    fn engine_receives_the_exact_codepoint_set() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = write_fake_fonts(tmp.path(), 2);
        let engine = FakeEngine::default();

        generate_subset_font(
            &engine,
            &inputs,
            &mapping(&[("user", "f007"), ("rss", "f09e"), ("github", "f09b")]),
            &tmp.path().join("subset"),
            &[Flavor::Ttf],
        )
        .unwrap();

        let expected: BTreeSet<u32> = [0xf007, 0xf09e, 0xf09b].into();
        let calls = engine.calls.lock().unwrap();
        let subset_calls: Vec<_> =
            calls.iter().filter(|c| matches!(c, Call::Subset(_))).collect();
        assert_eq!(subset_calls.len(), 2);
        for call in subset_calls {
            assert_eq!(call, &Call::Subset(expected.clone()));
        }
    }

    #[test]
    fn merge_joins_after_all_subsets() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = write_fake_fonts(tmp.path(), 3);
        let engine = FakeEngine::default();

        generate_subset_font(
            &engine,
            &inputs,
            &mapping(&[("user", "f007")]),
            &tmp.path().join("subset"),
            &[Flavor::Ttf],
        )
        .unwrap();

        let calls = engine.calls.lock().unwrap();
        let merge_pos = calls.iter().position(|c| matches!(c, Call::Merge(_))).unwrap();
        assert_eq!(calls[merge_pos], Call::Merge(3));
        assert!(calls[..merge_pos].iter().all(|c| matches!(c, Call::Subset(_))));
        assert_eq!(calls[..merge_pos].len(), 3);
    }

    #[test]
    fn encode_failure_writes_no_files() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = write_fake_fonts(tmp.path(), 1);
        let engine = FakeEngine { fail_encode: true, ..FakeEngine::default() };
        let base = tmp.path().join("subset");

        let result = generate_subset_font(
            &engine,
            &inputs,
            &mapping(&[("user", "f007")]),
            &base,
            &[Flavor::Woff2, Flavor::Woff],
        );

        assert!(matches!(result, Err(Error::Subset(_))));
        assert!(!base.with_extension("woff2").exists());
        assert!(!base.with_extension("woff").exists());
    }

    #[test]
    fn missing_input_font_is_reported_with_its_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("fa-solid-900.ttf");
        let engine = FakeEngine::default();

        let result = generate_subset_font(
            &engine,
            std::slice::from_ref(&missing),
            &mapping(&[("user", "f007")]),
            &tmp.path().join("subset"),
            &[Flavor::Ttf],
        );

        assert!(matches!(result, Err(Error::InputFont { path, .. }) if path == missing));
    }
}
