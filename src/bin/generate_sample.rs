//! Writes a small deterministic sample TSV for demos and manual testing.

fn main() {
    let names = [
        "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi",
    ];
    let departments = ["biology", "chemistry", "physics"];

    let output_path = "sample_people.tsv";
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(output_path)
        .expect("Failed to create output file");

    writer
        .write_record(["id", "name", "department", "score"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for (i, name) in names.iter().enumerate() {
        for (j, department) in departments.iter().enumerate() {
            let id = i * departments.len() + j + 1;
            // Spread scores over 0..100; every seventh row left empty to
            // exercise the missing-value path.
            let score = if id % 7 == 0 {
                String::new()
            } else {
                ((id * 37 + j * 11) % 101).to_string()
            };
            writer
                .write_record([id.to_string(), name.to_string(), department.to_string(), score])
                .expect("Failed to write row");
            rows += 1;
        }
    }
    writer.flush().expect("Failed to flush output file");

    println!("Wrote {rows} rows to {output_path}");
}
