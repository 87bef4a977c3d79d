use pals_core::{
    read_file, to_json, to_yaml, write_file, BeamLine, Drift, MagneticMultipoleParameters,
    PalsError, Quadrupole,
};

fn build() -> Result<BeamLine, PalsError> {
    let quad1 = Quadrupole::new(
        "quad1",
        1.0,
        MagneticMultipoleParameters::from_pairs([("Bn1", 1.0)])?,
    )?;
    let quad2 = Quadrupole::new(
        "quad2",
        1.0,
        MagneticMultipoleParameters::from_pairs([("Bn1", -1.0)])?,
    )?;

    Ok(BeamLine::new(
        "fodo_cell",
        vec![
            Drift::new("drift1", 0.25)?.into(),
            quad1.into(),
            Drift::new("drift2", 0.5)?.into(),
            quad2.into(),
            Drift::new("drift3", 0.5)?.into(),
        ],
    )?)
}

fn run() -> Result<(), PalsError> {
    let line = build()?;
    let dir = std::env::temp_dir();

    println!("Dumping YAML data...\n{}", to_yaml(&line)?);
    let yaml_file = dir.join("examples_fodo.yaml");
    write_file(&line, &yaml_file)?;
    assert_eq!(line, read_file(&yaml_file)?);

    println!("Dumping JSON data...\n{}", to_json(&line)?);
    let json_file = dir.join("examples_fodo.json");
    write_file(&line, &json_file)?;
    assert_eq!(line, read_file(&json_file)?);

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
