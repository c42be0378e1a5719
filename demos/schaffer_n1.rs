use nsga_rank::{
  execution::Parallelize,
  objective::Minimize,
  ranking::Nsga2Ranker,
  selection::CrowdedTournament,
};
use rand::prelude::*;
use rand_distr::Normal;

fn main() {
  // initial solutions lie between 0 and 100
  let mut population: Vec<f64> = (0..100).map(f64::from).collect();
  let population_size = population.len();

  // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
  let f1: fn(&f64) -> f64 = |x| x.powi(2);
  let f2: fn(&f64) -> f64 = |x| (x - 2.0).powi(2);
  let ranker = Nsga2Ranker::builder()
    .objectives([Minimize(f1), Minimize(f2)].par_batch())
    .build();

  // binary tournament picks parents
  let tournament = CrowdedTournament::default();
  // and offspring are mutated with values from normal distribution
  let normal = Normal::new(0.0, 1.0).unwrap(); // which comes from 'rand_distr'
  let mut rng = StdRng::seed_from_u64(0);

  for _ in 0..100 {
    let ranking = ranker.rank(&population).unwrap();
    let parents = tournament.select(&ranking, population_size, &mut rng);
    // each offspring lies somewhere between its two parents
    let offspring: Vec<f64> = parents
      .chunks(2)
      .flat_map(|pair| {
        let (x, y) = (population[pair[0]], population[pair[pair.len() - 1]]);
        let r: f64 = rng.gen_range(-0.5..1.5);
        let child = x + r * (y - x);
        [child, child + normal.sample(&mut rng)]
      })
      .collect();
    population.extend(offspring);
    population = ranker
      .select_survivors(population, population_size)
      .unwrap();
  }

  // Pareto optimal solutions lie between 0 and 2
  println!("   x   |   f1   |   f2   ");
  for x in population.iter().take(10) {
    println!("{x:.4} | {:.4} | {:.4}", f1(x), f2(x));
  }
  println!("  ...  |  ...   |  ...   ");
}
