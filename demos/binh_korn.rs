use nsga_rank::{
  objective::{Minimize, Objective},
  ranking::Nsga2Ranker,
  selection::CrowdedTournament,
};
use rand::prelude::*;
use rand_distr::Normal;

// our 'solution' type represented by a pair of floating point values
type S = (f64, f64);

fn main() {
  // initial population covers the search space 0 <= x <= 5, 0 <= y <= 3
  let mut population: Vec<S> = (0..100)
    .map(|i| (f64::from(i % 10) / 2.0, f64::from(i / 10) / 3.0))
    .collect();
  let population_size = population.len();

  // objective function f1(x, y) = 4x^2 + 4y^2
  let f1 = Minimize(|&(x, y): &S| 4.0 * x.powi(2) + 4.0 * y.powi(2));
  // and another objective function f2(x, y) = (x - 5)^2 + (y - 5)^2
  let f2 = Minimize(|&(x, y): &S| (x - 5.0).powi(2) + (y - 5.0).powi(2));
  let objectives: [&(dyn Objective<S> + Sync); 2] = [&f1, &f2];

  let ranker = Nsga2Ranker::builder()
    .objectives(objectives)
    .parallel_sorting(true)
    .build();
  let tournament = CrowdedTournament(3);
  let normal = Normal::new(0.0, 0.1).unwrap();
  let mut rng = StdRng::seed_from_u64(0);

  for _ in 0..100 {
    let ranking = ranker.rank(&population).unwrap();
    let offspring: Vec<S> = tournament
      .select(&ranking, population_size, &mut rng)
      .into_iter()
      .map(|parent| {
        let (x, y) = population[parent];
        // mutate a copy of the parent, staying inside the search space
        (
          (x + normal.sample(&mut rng)).clamp(0.0, 5.0),
          (y + normal.sample(&mut rng)).clamp(0.0, 3.0),
        )
      })
      .collect();
    population.extend(offspring);
    population = ranker
      .select_survivors(population, population_size)
      .unwrap();
  }

  let ranking = ranker.rank(&population).unwrap();
  println!("found {} Pareto optimal solutions", ranking.fronts()[0].len());
  println!("   x   |   y   |   f1    |   f2   ");
  for &i in ranking.fronts()[0].iter().take(10) {
    let s = &population[i];
    let (v1, v2) = (f1.evaluate(s).unwrap(), f2.evaluate(s).unwrap());
    println!("{:.4} | {:.4} | {v1:>7.3} | {v2:>6.3}", s.0, s.1);
  }
  println!("  ...  |  ...  |   ...   |  ...   ");
}
