use super::format_reference_atoms;
use crate::config::{CliOverrides, PartialConfig};
use crate::error::Result;
use t3ps::core::dihedrals::table::{DihedralFamily, DihedralTable};

pub fn run(partial: PartialConfig) -> Result<()> {
    let config = partial.merge_with_cli(&CliOverrides::default())?;
    print!("{}", render(&config.measure.table));
    Ok(())
}

pub fn render(table: &DihedralTable) -> String {
    let mut out = String::new();
    for family in DihedralFamily::ALL {
        out.push_str(&format!("{} [{}]\n", family.title(), family.key()));
        for def in table.family(family) {
            out.push_str(&format!(
                "  {:<3} {:<32} {}\n",
                def.name,
                format_reference_atoms(&def.atoms),
                def.description
            ));
        }
    }
    out
}
