//! Read a matrix back from a MatrixMarket file into several layouts

use matstore::{read_csr, read_dense, MatrixStorage, PrintLevel, StorageOrder};

fn main() -> Result<(), matstore::ReadError> {
    env_logger::init();

    let filename = "example_matrix.mtx";
    if !std::path::Path::new(filename).exists() {
        println!("file '{filename}' not found!");
        println!("   run 'cargo run --example write_matrix' first");
        return Ok(());
    }

    println!("reading '{filename}' as fixed compressed rows...");
    let csr = read_csr::<f64>(filename)?;
    println!("   {} entries over {}", csr.nnz(), csr.extent());
    println!("   sign pattern: {}", csr.render(PrintLevel::Signs));

    println!("reading '{filename}' as dense column-major...");
    let dense = read_dense::<f64>(filename, StorageOrder::ColumnMajor)?;
    println!("   {}", dense.render(PrintLevel::Full));
    println!("   flat buffer holds {} values", dense.as_slice().len());
    Ok(())
}
