//! Build a sparse coordinate matrix, symmetrize it and write it out

use matstore::{write_market, CoordMatrix, MatrixStorage, PrintLevel, StorageOrder};

fn main() -> Result<(), matstore::ReadError> {
    env_logger::init();

    let mut m = CoordMatrix::<f64>::new(StorageOrder::RowMajor, 0);
    m.set_extent(5, 5)?;

    // upper triangle of a small banded system
    for i in 0..5 {
        m.set(i, i, 4.0)?;
        if i + 1 < 5 {
            m.set(i, i + 1, -1.0)?;
        }
    }
    println!("before augmentation: {}", m.render(PrintLevel::Size));

    m.augment_symmetry();
    m.compress();
    m.check()?;
    println!("after augmentation:  {}", m.render(PrintLevel::Full));

    write_market("example_matrix.mtx", &m)?;
    println!("\nwrote example_matrix.mtx");
    println!("run 'cargo run --example read_matrix' to read it back");
    Ok(())
}
