use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::batch::BatchReport;

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Ok,
    Failed,
}

#[derive(Serialize, Debug)]
pub struct ItemRecord {
    pub letter: String,
    pub file: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What one run did, in a shape that can be dumped as json next to the images.
#[derive(Serialize, Debug)]
pub struct RunRecord {
    pub operation: String,
    pub output_dir: String,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<ItemRecord>,
}

impl RunRecord {
    pub fn new(operation: &str, report: &BatchReport) -> Self {
        let items = report
            .outcomes
            .iter()
            .map(|o| ItemRecord {
                letter: o.letter.to_string(),
                file: o.path.display().to_string(),
                status: if o.is_ok() {
                    ItemStatus::Ok
                } else {
                    ItemStatus::Failed
                },
                error: o.result.as_ref().err().map(|e| format!("{e:#}")),
            })
            .collect();
        Self {
            operation: operation.to_string(),
            output_dir: report.out_dir.display().to_string(),
            succeeded: report.succeeded(),
            failed: report.total() - report.succeeded(),
            items,
        }
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| anyhow::anyhow!("Error writing run record to {path:?}: {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::alphabet::Letter;
    use crate::batch::run_batch;
    use crate::batch::tests::ScriptedWork;

    #[test]
    fn record_lists_every_letter_with_its_status() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("signs");
        let mut work = ScriptedWork::new(&['Q']);
        let report = run_batch(Letter::all(), &out, &mut work, &mut Vec::new()).unwrap();

        let record_path = tmp.path().join("run.json");
        RunRecord::new("download", &report).write(&record_path).unwrap();

        let json: Value = serde_json::from_str(&std::fs::read_to_string(&record_path).unwrap())
            .unwrap();
        assert_eq!(json["operation"], "download");
        assert_eq!(json["succeeded"], 25);
        assert_eq!(json["failed"], 1);

        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 26);
        assert_eq!(items[0]["letter"], "A");
        assert_eq!(
            items[0]["file"].as_str().unwrap(),
            out.join("a.png").display().to_string()
        );
        assert_eq!(items[0]["status"], "ok");
        assert!(items[0].get("error").is_none());

        let q = &items[16];
        assert_eq!(q["letter"], "Q");
        assert_eq!(q["status"], "failed");
        assert_eq!(q["error"], "simulated transport error for Q");
    }
}
